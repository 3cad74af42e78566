//! Read-only queries.
//!
//! Nothing here writes to the store. Absent pools are reported as `None`
//! rather than as errors, except by [`Keeper::quote`] which needs a curve.

use crate::keeper::Keeper;
use bancor_domain::error::BancorError;
use bancor_domain::pool::{BondingCurvePool, PoolKey};
use bancor_ledger::{AccountLedger, AssetRegistry, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cost preview of a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub key: PoolKey,
    pub is_buy: bool,
    pub amount: u128,
    /// Integer money the trade would settle for.
    pub money: u128,
    /// Unrounded integral of price over the traversed segment.
    pub exact_cost: Decimal,
    pub price_before: Decimal,
    pub price_after: Decimal,
}

impl<B: AccountLedger, R: AssetRegistry> Keeper<B, R> {
    pub fn pool_exists(&self, ctx: &Context<'_>, key: &PoolKey) -> bool {
        self.registry.exists(ctx, key)
    }

    /// Pool stored under `key`.
    pub fn pool(&self, ctx: &Context<'_>, key: &PoolKey) -> Result<Option<BondingCurvePool>, BancorError> {
        self.registry.load(ctx, key)
    }

    /// Pool of the pair, in either order.
    pub fn pool_by_pair(&self, ctx: &Context<'_>, a: &str, b: &str) -> Result<Option<BondingCurvePool>, BancorError> {
        self.registry.load(ctx, &PoolKey::new(a, b))
    }

    /// All pools in key order.
    pub fn pools(&self, ctx: &Context<'_>) -> Result<Vec<BondingCurvePool>, BancorError> {
        self.registry.iter(ctx)
    }

    /// Previews a trade of `amount` stock without executing it.
    ///
    /// # Errors
    /// `NoBancorExists` if there is no pool under `key`, and the same amount
    /// and range errors a trade would raise.
    pub fn quote(&self, ctx: &Context<'_>, key: &PoolKey, amount: u128, is_buy: bool) -> Result<Quote, BancorError> {
        let params = self.params(ctx)?;
        if amount == 0 {
            return Err(BancorError::NonPositiveAmount);
        }
        if amount > params.max_trade_amount {
            return Err(BancorError::TradeAmountTooLarge);
        }
        let pool = self.registry.load(ctx, key)?.ok_or(BancorError::NoBancorExists)?;
        let curve = pool.curve()?.with_max_trade_amount(params.max_trade_amount);

        let magnitude = i128::try_from(amount).map_err(|_| BancorError::TradeAmountTooLarge)?;
        let delta = if is_buy { magnitude } else { -magnitude };
        let next = curve.target(pool.stock_in_pool, delta)?;

        let quote = Quote {
            key: key.clone(),
            is_buy,
            amount,
            money: curve.settle(pool.stock_in_pool, delta)?.unsigned_abs(),
            exact_cost: curve.cost(pool.stock_in_pool, delta)?.abs(),
            price_before: curve.price_at(pool.stock_in_pool)?,
            price_after: curve.price_at(next)?,
        };
        debug!(
            key = %quote.key,
            is_buy,
            amount,
            money = quote.money,
            exact_cost = %quote.exact_cost,
            "Bancor quote"
        );
        Ok(quote)
    }
}
