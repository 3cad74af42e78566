use crate::error::BancorError;
use crate::denom::is_valid_symbol;
use serde::{Deserialize, Serialize};

/// Default ceiling on a single trade.
pub const DEFAULT_MAX_TRADE_AMOUNT: u128 = 100_000_000_000_000;
/// Default native denomination.
pub const DEFAULT_NATIVE_DENOM: &str = "cet";

/// Module parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BancorParams {
    /// Largest stock amount a single trade may move.
    pub max_trade_amount: u128,
    /// Fee in native denomination charged when a pool is created.
    pub create_pool_fee: u128,
    /// Native denomination; never accepted as stock.
    pub native_denom: String,
}

impl Default for BancorParams {
    fn default() -> Self {
        Self {
            max_trade_amount: DEFAULT_MAX_TRADE_AMOUNT,
            create_pool_fee: 0,
            native_denom: DEFAULT_NATIVE_DENOM.to_string(),
        }
    }
}

impl BancorParams {
    /// Sets the trade ceiling.
    #[must_use]
    pub fn with_max_trade_amount(mut self, amount: u128) -> Self {
        self.max_trade_amount = amount;
        self
    }

    /// Sets the pool creation fee.
    #[must_use]
    pub fn with_create_pool_fee(mut self, fee: u128) -> Self {
        self.create_pool_fee = fee;
        self
    }

    /// Sets the native denomination.
    #[must_use]
    pub fn with_native_denom(mut self, denom: impl Into<String>) -> Self {
        self.native_denom = denom.into();
        self
    }

    /// Checks parameter sanity.
    ///
    /// # Errors
    /// `NonPositiveAmount` for a zero trade ceiling, `InvalidSymbol` for a
    /// malformed native denomination.
    pub fn validate(&self) -> Result<(), BancorError> {
        if self.max_trade_amount == 0 {
            return Err(BancorError::NonPositiveAmount);
        }
        if !is_valid_symbol(&self.native_denom) {
            return Err(BancorError::InvalidSymbol);
        }
        Ok(())
    }
}
