//! Trade execution against a pool's curve.

use crate::events::{BancorEvent, TradeReceipt};
use crate::keeper::{Keeper, escrow_address};
use bancor_domain::error::BancorError;
use bancor_domain::msgs::MsgBancorTrade;
use bancor_ledger::{AccountLedger, AssetRegistry, Context};
use tracing::info;

impl<B: AccountLedger, R: AssetRegistry> Keeper<B, R> {
    /// Buys or sells stock against the pool for the pair.
    ///
    /// All balance movements and the pool update are applied together or
    /// not at all.
    ///
    /// # Errors
    /// Validation errors before any lookup, `NoBancorExists` if no pool
    /// matches, `ReserveOutOfRange` if the curve position would leave
    /// `[0, max_supply]`, `ExceedsMoneyLimit`/`BelowMoneyLimit` on slippage,
    /// `TokenForbiddenByOwner` for frozen tokens, `InsufficientFunds` if the
    /// sender cannot pay.
    pub fn trade(&self, ctx: &mut Context<'_>, msg: &MsgBancorTrade) -> Result<BancorEvent, BancorError> {
        let params = self.params(ctx)?;
        msg.validate_basic(&params)?;
        self.ensure_registered(ctx, &msg.stock, &msg.money)?;

        let key = msg.pool_key();
        let mut pool = self
            .registry
            .load(ctx, &key)?
            .filter(|pool| pool.stock == msg.stock)
            .ok_or(BancorError::NoBancorExists)?;

        let delta = msg.delta()?;
        let curve = pool.curve()?.with_max_trade_amount(params.max_trade_amount);
        let next_stock = curve.target(pool.stock_in_pool, delta)?;
        let money = curve.settle(pool.stock_in_pool, delta)?.unsigned_abs();
        let spot_price = curve.price_at(next_stock)?;

        if msg.is_buy && money > msg.money_limit {
            return Err(BancorError::ExceedsMoneyLimit {
                cost: money,
                limit: msg.money_limit,
            });
        }
        if !msg.is_buy && money < msg.money_limit {
            return Err(BancorError::BelowMoneyLimit {
                proceeds: money,
                limit: msg.money_limit,
            });
        }

        self.ensure_not_forbidden(ctx, &[&msg.stock, &msg.money], &msg.sender)?;

        let escrow = escrow_address();
        ctx.atomic(|ctx| -> Result<(), BancorError> {
            if msg.is_buy {
                self.bank
                    .transfer(ctx, &msg.sender, &escrow, &msg.money, money)?;
                self.bank
                    .transfer(ctx, &escrow, &msg.sender, &msg.stock, msg.amount)?;
                pool.money_in_pool = pool
                    .money_in_pool
                    .checked_add(money)
                    .ok_or(BancorError::ArithmeticOverflow)?;
            } else {
                self.bank
                    .transfer(ctx, &msg.sender, &escrow, &msg.stock, msg.amount)?;
                self.bank
                    .transfer(ctx, &escrow, &msg.sender, &msg.money, money)?;
                pool.money_in_pool = pool
                    .money_in_pool
                    .checked_sub(money)
                    .ok_or(BancorError::ArithmeticOverflow)?;
            }
            pool.stock_in_pool = next_stock;
            self.registry.save(ctx, &pool)
        })?;

        info!(
            key = %key,
            sender = %msg.sender,
            is_buy = msg.is_buy,
            amount = msg.amount,
            money,
            stock_in_pool = pool.stock_in_pool,
            spot_price = %spot_price,
            "Bancor trade executed"
        );

        Ok(BancorEvent::Traded(TradeReceipt {
            key,
            sender: msg.sender.clone(),
            is_buy: msg.is_buy,
            amount: msg.amount,
            money,
            stock_in_pool: pool.stock_in_pool,
            money_in_pool: pool.money_in_pool,
            spot_price,
        }))
    }
}
