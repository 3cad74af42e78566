//! Pool creation and cancellation.
//!
//! Creating a pool moves the owner's `max_supply` stock into the module
//! escrow as inventory, so every buy can be delivered. Cancelling returns
//! the remaining inventory and the collected money to the owner.

use crate::events::BancorEvent;
use crate::keeper::{Keeper, escrow_address, fee_collector_address};
use bancor_domain::error::BancorError;
use bancor_domain::msgs::{MsgBancorCancel, MsgBancorInit};
use bancor_domain::pool::BondingCurvePool;
use bancor_ledger::{AccountLedger, AssetRegistry, BlockClock, Context};
use tracing::info;

impl<B: AccountLedger, R: AssetRegistry> Keeper<B, R> {
    /// Creates a pool.
    ///
    /// # Errors
    /// Validation errors for malformed instructions, `PoolAlreadyExists` if
    /// the pair already has a pool, `TokenForbiddenByOwner` if the stock is
    /// frozen for the owner, `InsufficientFunds` if the owner cannot fund the
    /// inventory or the creation fee.
    pub fn init(&self, ctx: &mut Context<'_>, msg: &MsgBancorInit) -> Result<BancorEvent, BancorError> {
        let params = self.params(ctx)?;
        msg.validate_basic(&params)?;
        self.ensure_registered(ctx, &msg.stock, &msg.money)?;

        let key = msg.pool_key();
        if self.registry.exists(ctx, &key) {
            return Err(BancorError::PoolAlreadyExists);
        }
        self.ensure_not_forbidden(ctx, &[&msg.stock], &msg.owner)?;

        let fee = params.create_pool_fee;
        ctx.atomic(|ctx| -> Result<(), BancorError> {
            if fee > 0 {
                self.bank.transfer(
                    ctx,
                    &msg.owner,
                    &fee_collector_address(),
                    &params.native_denom,
                    fee,
                )?;
            }
            self.bank
                .transfer(ctx, &msg.owner, &escrow_address(), &msg.stock, msg.max_supply)?;
            let pool = BondingCurvePool::new(
                msg.owner.clone(),
                msg.stock.clone(),
                msg.money.clone(),
                msg.init_price,
                msg.max_supply,
                msg.max_price,
                msg.enable_cancel_time,
            );
            self.registry.save(ctx, &pool)
        })?;

        info!(
            key = %key,
            owner = %msg.owner,
            init_price = %msg.init_price,
            max_price = %msg.max_price,
            max_supply = msg.max_supply,
            enable_cancel_time = msg.enable_cancel_time,
            "Bancor pool created"
        );

        Ok(BancorEvent::PoolCreated {
            key,
            owner: msg.owner.clone(),
            stock: msg.stock.clone(),
            money: msg.money.clone(),
            max_supply: msg.max_supply,
            fee,
        })
    }

    /// Retires a pool and returns its holdings to the owner.
    ///
    /// # Errors
    /// `NoBancorExists` if there is no pool with this stock and money,
    /// `NotOwner` for any requester but the owner, `CancelNotYetEnabled`
    /// before the pool's enable-cancel time.
    pub fn cancel(&self, ctx: &mut Context<'_>, msg: &MsgBancorCancel) -> Result<BancorEvent, BancorError> {
        let params = self.params(ctx)?;
        msg.validate_basic(&params)?;

        let key = msg.pool_key();
        let pool = self
            .registry
            .load(ctx, &key)?
            .filter(|pool| pool.stock == msg.stock)
            .ok_or(BancorError::NoBancorExists)?;

        if pool.owner != msg.owner {
            return Err(BancorError::NotOwner);
        }
        let now = ctx.block_time();
        if !pool.is_cancel_enabled(now) {
            return Err(BancorError::CancelNotYetEnabled {
                enable_cancel_time: pool.enable_cancel_time,
                now,
            });
        }

        let stock_returned = pool.stock_inventory();
        let money_returned = pool.money_in_pool;
        ctx.atomic(|ctx| -> Result<(), BancorError> {
            let escrow = escrow_address();
            self.bank
                .transfer(ctx, &escrow, &pool.owner, &pool.stock, stock_returned)?;
            self.bank
                .transfer(ctx, &escrow, &pool.owner, &pool.money, money_returned)?;
            self.registry.remove(ctx, &pool);
            Ok(())
        })?;

        info!(
            key = %key,
            owner = %pool.owner,
            stock_returned,
            money_returned,
            "Bancor pool cancelled"
        );

        Ok(BancorEvent::PoolCancelled {
            key,
            owner: pool.owner,
            stock_returned,
            money_returned,
        })
    }
}
