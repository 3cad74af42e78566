//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use bancor_domain::prelude::*;
//! ```

pub use crate::MODULE_NAME;
pub use crate::denom::is_valid_symbol;
pub use crate::error::BancorError;
pub use crate::math::BondingCurve;
pub use crate::msgs::{Instruction, MsgBancorCancel, MsgBancorInit, MsgBancorTrade};
pub use crate::params::BancorParams;
pub use crate::pool::{BondingCurvePool, PoolKey};
