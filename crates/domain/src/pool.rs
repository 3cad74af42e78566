use crate::error::BancorError;
use crate::math::BondingCurve;
use bancor_ledger::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of a denomination pair.
///
/// The two denominations are ordered lexicographically, so both trade
/// directions resolve to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey(String);

impl PoolKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(format!("{a}/{b}"))
        } else {
            Self(format!("{b}/{a}"))
        }
    }

    /// Wraps an already formatted key without reordering.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bonding-curve pool record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondingCurvePool {
    pub owner: Address,
    pub stock: String,
    pub money: String,
    pub init_price: Decimal,
    pub max_supply: u128,
    pub max_price: Decimal,
    /// Curve position: stock issued out of the pool's inventory.
    pub stock_in_pool: u128,
    /// Money held against `stock_in_pool`.
    pub money_in_pool: u128,
    /// Unix seconds after which the owner may cancel.
    pub enable_cancel_time: i64,
}

impl BondingCurvePool {
    /// Creates an empty pool.
    pub fn new(
        owner: Address,
        stock: impl Into<String>,
        money: impl Into<String>,
        init_price: Decimal,
        max_supply: u128,
        max_price: Decimal,
        enable_cancel_time: i64,
    ) -> Self {
        Self {
            owner,
            stock: stock.into(),
            money: money.into(),
            init_price,
            max_supply,
            max_price,
            stock_in_pool: 0,
            money_in_pool: 0,
            enable_cancel_time,
        }
    }

    #[must_use]
    pub fn key(&self) -> PoolKey {
        PoolKey::new(&self.stock, &self.money)
    }

    /// Pricing curve of this pool.
    pub fn curve(&self) -> Result<BondingCurve, BancorError> {
        BondingCurve::new(self.init_price, self.max_price, self.max_supply)
    }

    /// Stock still held as inventory.
    #[must_use]
    pub fn stock_inventory(&self) -> u128 {
        self.max_supply.saturating_sub(self.stock_in_pool)
    }

    /// Current unit price.
    pub fn spot_price(&self) -> Result<Decimal, BancorError> {
        self.curve()?.price_at(self.stock_in_pool)
    }

    /// Whether `money_in_pool` matches the curve value of `stock_in_pool`.
    pub fn is_consistent(&self) -> Result<bool, BancorError> {
        Ok(self.curve()?.reserve_value(self.stock_in_pool)? == self.money_in_pool)
    }

    #[must_use]
    pub fn is_cancel_enabled(&self, now: i64) -> bool {
        now >= self.enable_cancel_time
    }
}
