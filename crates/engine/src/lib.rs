//! Bonding-curve AMM engine.
//!
//! This crate provides the state machine of the module:
//! - Pool registry over the ledger store
//! - Pool creation and cancellation
//! - Trade execution against the curve
//! - Instruction dispatch inside one atomic ledger transaction
//! - Read-only queries and genesis import/export

/// Prelude module for convenient imports.
pub mod prelude;

/// Events emitted by successful instructions.
pub mod events;
/// Trade execution.
pub mod executor;
/// Genesis import and export.
pub mod genesis;
/// Instruction dispatch.
pub mod handler;
/// Keeper wiring the module to its collaborators.
pub mod keeper;
/// Pool creation and cancellation.
pub mod lifecycle;
/// Read-only queries.
pub mod query;
/// Pool storage.
pub mod registry;
