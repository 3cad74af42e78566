//! Linear bonding curve pricing.
//!
//! price(s) = init + (max - init) * s / max_supply, for s in [0, max_supply]
//!
//! The money a trade moves is the definite integral of price over the
//! traversed segment. Quotes use exact decimal arithmetic; settlement uses
//! the floor of the integral from zero, computed on 256-bit integers, so
//! that the money held by a pool is a pure function of its curve position.

use crate::error::BancorError;
use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Curve parameters of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondingCurve {
    init_price: Decimal,
    max_price: Decimal,
    max_supply: u128,
    max_trade_amount: u128,
}

impl BondingCurve {
    /// Creates a curve.
    ///
    /// # Errors
    /// `NonPositiveSupply` for a zero supply, `NonPositivePrice` for a
    /// negative init price or non-positive max price,
    /// `MaxPriceBelowInitPrice` for a downward slope, `ArithmeticOverflow`
    /// if some position of the curve cannot be priced.
    pub fn new(init_price: Decimal, max_price: Decimal, max_supply: u128) -> Result<Self, BancorError> {
        if max_supply == 0 {
            return Err(BancorError::NonPositiveSupply);
        }
        if init_price < Decimal::ZERO {
            return Err(BancorError::NonPositivePrice);
        }
        if max_price <= Decimal::ZERO {
            return Err(BancorError::NonPositivePrice);
        }
        if max_price < init_price {
            return Err(BancorError::MaxPriceBelowInitPrice);
        }
        let curve = Self {
            init_price: init_price.normalize(),
            max_price: max_price.normalize(),
            max_supply,
            max_trade_amount: u128::MAX,
        };
        curve.ensure_full_range()?;
        Ok(curve)
    }

    /// Every quantity grows with the traversed span, so evaluating them over
    /// `[0, max_supply]` bounds every movement the curve can price.
    fn ensure_full_range(&self) -> Result<(), BancorError> {
        let full = i128::try_from(self.max_supply).map_err(|_| BancorError::ArithmeticOverflow)?;
        self.price_at(self.max_supply)?;
        self.cost(0, full)?;
        let value = self.reserve_value(self.max_supply)?;
        i128::try_from(value).map_err(|_| BancorError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Caps the size of a single curve movement.
    #[must_use]
    pub fn with_max_trade_amount(mut self, max_trade_amount: u128) -> Self {
        self.max_trade_amount = max_trade_amount;
        self
    }

    #[must_use]
    pub fn init_price(&self) -> Decimal {
        self.init_price
    }

    #[must_use]
    pub fn max_price(&self) -> Decimal {
        self.max_price
    }

    #[must_use]
    pub fn max_supply(&self) -> u128 {
        self.max_supply
    }

    /// Instantaneous unit price at curve position `supply`.
    pub fn price_at(&self, supply: u128) -> Result<Decimal, BancorError> {
        if supply > self.max_supply {
            return Err(BancorError::ReserveOutOfRange);
        }
        let s = to_decimal_u(supply)?;
        let m = to_decimal_u(self.max_supply)?;
        let slope_part = (self.max_price - self.init_price)
            .checked_mul(s)
            .and_then(|v| v.checked_div(m))
            .ok_or(BancorError::ArithmeticOverflow)?;
        self.init_price
            .checked_add(slope_part)
            .ok_or(BancorError::ArithmeticOverflow)
    }

    /// Validates a movement of `delta` from `supply` and returns the new
    /// curve position.
    pub fn target(&self, supply: u128, delta: i128) -> Result<u128, BancorError> {
        if delta.unsigned_abs() > self.max_trade_amount {
            return Err(BancorError::TradeAmountTooLarge);
        }
        if supply > self.max_supply {
            return Err(BancorError::ReserveOutOfRange);
        }
        let next = if delta >= 0 {
            supply.checked_add(delta.unsigned_abs())
        } else {
            supply.checked_sub(delta.unsigned_abs())
        }
        .ok_or(BancorError::ReserveOutOfRange)?;
        if next > self.max_supply {
            return Err(BancorError::ReserveOutOfRange);
        }
        Ok(next)
    }

    /// Exact integral of price over `[supply, supply + delta]`.
    ///
    /// Positive for buys (money owed to the pool), negative for sells
    /// (proceeds owed by the pool).
    pub fn cost(&self, supply: u128, delta: i128) -> Result<Decimal, BancorError> {
        self.target(supply, delta)?;
        let s0 = i128::try_from(supply).map_err(|_| BancorError::ArithmeticOverflow)?;

        // (s0 + d)^2 - s0^2 == d * (2 * s0 + d)
        let span = s0
            .checked_mul(2)
            .and_then(|v| v.checked_add(delta))
            .and_then(|v| v.checked_mul(delta))
            .ok_or(BancorError::ArithmeticOverflow)?;

        let half_slope = self.half_slope()?;
        let d = Decimal::from_i128(delta).ok_or(BancorError::ArithmeticOverflow)?;
        let span = Decimal::from_i128(span).ok_or(BancorError::ArithmeticOverflow)?;

        let linear = self
            .init_price
            .checked_mul(d)
            .ok_or(BancorError::ArithmeticOverflow)?;
        let quadratic = half_slope
            .checked_mul(span)
            .ok_or(BancorError::ArithmeticOverflow)?;
        linear
            .checked_add(quadratic)
            .ok_or(BancorError::ArithmeticOverflow)
    }

    /// Floor of the integral of price over `[0, supply]`.
    pub fn reserve_value(&self, supply: u128) -> Result<u128, BancorError> {
        if supply > self.max_supply {
            return Err(BancorError::ReserveOutOfRange);
        }
        let scale = self.init_price.scale().max(self.max_price.scale());
        let init = scaled_mantissa(self.init_price, scale)?;
        let max = scaled_mantissa(self.max_price, scale)?;
        let slope = max.checked_sub(init).ok_or(BancorError::ArithmeticOverflow)?;

        let s = U256::from(supply);
        let two_m = U256::from(self.max_supply)
            .checked_mul(U256::from(2u8))
            .ok_or(BancorError::ArithmeticOverflow)?;

        // (init * 2M * s + slope * s^2) / (2M * 10^scale)
        let linear = init
            .checked_mul(two_m)
            .and_then(|v| v.checked_mul(s))
            .ok_or(BancorError::ArithmeticOverflow)?;
        let quadratic = slope
            .checked_mul(s)
            .and_then(|v| v.checked_mul(s))
            .ok_or(BancorError::ArithmeticOverflow)?;
        let numerator = linear
            .checked_add(quadratic)
            .ok_or(BancorError::ArithmeticOverflow)?;
        let denominator = two_m
            .checked_mul(U256::exp10(scale as usize))
            .ok_or(BancorError::ArithmeticOverflow)?;

        let value = numerator / denominator;
        if value > U256::from(u128::MAX) {
            return Err(BancorError::ArithmeticOverflow);
        }
        Ok(value.as_u128())
    }

    /// Integer money moved by a movement of `delta` from `supply`.
    ///
    /// Positive for buys, negative for sells.
    pub fn settle(&self, supply: u128, delta: i128) -> Result<i128, BancorError> {
        let next = self.target(supply, delta)?;
        let before = self.reserve_value(supply)?;
        let after = self.reserve_value(next)?;
        let before = i128::try_from(before).map_err(|_| BancorError::ArithmeticOverflow)?;
        let after = i128::try_from(after).map_err(|_| BancorError::ArithmeticOverflow)?;
        Ok(after - before)
    }

    fn half_slope(&self) -> Result<Decimal, BancorError> {
        let two_m = to_decimal_u(self.max_supply)?
            .checked_mul(Decimal::TWO)
            .ok_or(BancorError::ArithmeticOverflow)?;
        (self.max_price - self.init_price)
            .checked_div(two_m)
            .ok_or(BancorError::ArithmeticOverflow)
    }
}

fn to_decimal_u(value: u128) -> Result<Decimal, BancorError> {
    Decimal::from_u128(value).ok_or(BancorError::ArithmeticOverflow)
}

/// Mantissa of a non-negative decimal rescaled to `scale` fractional digits.
fn scaled_mantissa(value: Decimal, scale: u32) -> Result<U256, BancorError> {
    let mantissa = u128::try_from(value.mantissa()).map_err(|_| BancorError::ArithmeticOverflow)?;
    U256::from(mantissa)
        .checked_mul(U256::exp10((scale - value.scale()) as usize))
        .ok_or(BancorError::ArithmeticOverflow)
}
