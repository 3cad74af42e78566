//! Ledger collaborators consumed by the bonding-curve module.
//!
//! This crate provides the pieces of the surrounding state machine that the
//! AMM engine composes with:
//! - Key-value store with cache-wrapped (all-or-nothing) transactions
//! - Execution context carrying the block header
//! - Account balances and transfers
//! - Token registry with issuer and global freezes
//! - Typed parameter subspaces

/// Account addresses.
pub mod address;
/// String codec for `u128` amounts.
pub mod amount_serde;
/// Token registry.
pub mod asset;
/// Account balances.
pub mod bank;
/// Execution context and block clock.
pub mod context;
/// Ledger errors.
pub mod error;
/// Parameter subspaces.
pub mod params;
/// Key-value stores.
pub mod store;

pub use address::Address;
pub use asset::{AssetRegistry, TokenInfo, TokenRegistry};
pub use bank::{AccountLedger, Bank};
pub use context::{BlockClock, BlockHeader, Context, run_atomic};
pub use error::LedgerError;
pub use params::{ParamSubspace, ParameterStore};
pub use store::{CacheStore, KvStore, MemStore};
