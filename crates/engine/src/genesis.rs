//! Genesis import and export.

use crate::keeper::Keeper;
use bancor_domain::error::BancorError;
use bancor_domain::params::BancorParams;
use bancor_domain::pool::BondingCurvePool;
use bancor_ledger::{AccountLedger, AssetRegistry, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Module state at chain start.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: BancorParams,
    #[serde(default)]
    pub pools: Vec<BondingCurvePool>,
}

impl GenesisState {
    #[must_use]
    pub fn new(params: BancorParams, pools: Vec<BondingCurvePool>) -> Self {
        Self { params, pools }
    }

    /// Checks params and every pool record.
    ///
    /// # Errors
    /// Invalid params, malformed curves, positions beyond `max_supply`,
    /// money that does not match the curve, or two pools for one pair.
    pub fn validate(&self) -> Result<(), BancorError> {
        self.params.validate()?;
        let mut seen = BTreeSet::new();
        for pool in &self.pools {
            if pool.owner.is_empty() || pool.owner.is_module() {
                return Err(BancorError::InvalidAddress(format!("bad pool owner {:?}", pool.owner.as_str())));
            }
            let curve = pool.curve()?;
            if pool.stock_in_pool > curve.max_supply() {
                return Err(BancorError::ReserveOutOfRange);
            }
            if !pool.is_consistent()? {
                return Err(BancorError::Codec(format!(
                    "pool {} holds {} money, curve requires {}",
                    pool.key(),
                    pool.money_in_pool,
                    curve.reserve_value(pool.stock_in_pool)?
                )));
            }
            if !seen.insert(pool.key()) {
                return Err(BancorError::PoolAlreadyExists);
            }
        }
        Ok(())
    }
}

impl<B: AccountLedger, R: AssetRegistry> Keeper<B, R> {
    /// Loads a validated genesis into the store.
    ///
    /// Escrow balances backing the pools are part of the bank's genesis.
    pub fn init_genesis(&self, ctx: &mut Context<'_>, state: &GenesisState) -> Result<(), BancorError> {
        state.validate()?;
        ctx.atomic(|ctx| -> Result<(), BancorError> {
            self.registry.set_params(ctx, &state.params)?;
            for pool in &state.pools {
                self.registry.save(ctx, pool)?;
            }
            Ok(())
        })?;
        info!(pools = state.pools.len(), "Bancor genesis initialized");
        Ok(())
    }

    /// Current params and pools.
    pub fn export_genesis(&self, ctx: &Context<'_>) -> Result<GenesisState, BancorError> {
        Ok(GenesisState {
            params: self.params(ctx)?,
            pools: self.pools(ctx)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bancor_ledger::{Address, BlockHeader, MemStore};
    use rust_decimal_macros::dec;

    fn pool(stock: &str, stock_in_pool: u128, money_in_pool: u128) -> BondingCurvePool {
        let mut pool = BondingCurvePool::new(Address::from("owner"), stock, "cet", dec!(0), 100, dec!(10), 0);
        pool.stock_in_pool = stock_in_pool;
        pool.money_in_pool = money_in_pool;
        pool
    }

    #[test]
    fn test_default_genesis_is_valid() {
        let state = GenesisState::default();
        assert!(state.pools.is_empty());
        assert_eq!(state.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_pools() {
        let params = BancorParams::default();

        let inconsistent = GenesisState::new(params.clone(), vec![pool("abc", 10, 6)]);
        assert!(matches!(inconsistent.validate(), Err(BancorError::Codec(_))));

        let out_of_range = GenesisState::new(params.clone(), vec![pool("abc", 101, 0)]);
        assert_eq!(out_of_range.validate(), Err(BancorError::ReserveOutOfRange));

        let duplicate = GenesisState::new(params, vec![pool("abc", 0, 0), pool("abc", 10, 5)]);
        assert_eq!(duplicate.validate(), Err(BancorError::PoolAlreadyExists));
    }

    #[test]
    fn test_genesis_round_trip() {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let keeper = Keeper::default();
        let state = GenesisState::new(
            BancorParams::default().with_create_pool_fee(7),
            vec![pool("xyz", 10, 5), pool("abc", 0, 0)],
        );

        keeper.init_genesis(&mut ctx, &state).unwrap();
        let exported = keeper.export_genesis(&ctx).unwrap();
        assert_eq!(exported.params, state.params);
        let stocks: Vec<&str> = exported.pools.iter().map(|p| p.stock.as_str()).collect();
        assert_eq!(stocks, vec!["abc", "xyz"]);
    }
}
