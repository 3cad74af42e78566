//! Domain model of the bonding-curve AMM module.
//!
//! This crate provides:
//! - The pool record and its canonical pair key
//! - Module parameters
//! - Instructions with their stateless validation
//! - Curve pricing on exact decimal and 256-bit integer arithmetic
//! - The module error taxonomy

/// Denomination format rules.
pub mod denom;
/// Module errors.
pub mod error;
/// Curve mathematics.
pub mod math;
/// Instructions.
pub mod msgs;
/// Module parameters.
pub mod params;
/// Pool record.
pub mod pool;
/// Prelude module for convenient imports.
pub mod prelude;

/// Name of the module; used for its store namespace and escrow account.
pub const MODULE_NAME: &str = "bancorlite";
