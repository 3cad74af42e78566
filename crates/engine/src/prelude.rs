//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use bancor_engine::prelude::*;
//! ```

// Domain
pub use bancor_domain::prelude::*;

// Engine
pub use crate::events::{BancorEvent, TradeReceipt};
pub use crate::genesis::GenesisState;
pub use crate::keeper::{Keeper, escrow_address, fee_collector_address};
pub use crate::query::Quote;
pub use crate::registry::PoolRegistry;
