//! Keyed pool storage.
//!
//! Pools live under `bancorlite/pool/<key>` in the ledger store, JSON
//! encoded. Module parameters live in the `bancorlite` parameter subspace.
//! There is no cache beyond the ledger's own transactional overlay.

use bancor_domain::MODULE_NAME;
use bancor_domain::error::BancorError;
use bancor_domain::params::BancorParams;
use bancor_domain::pool::{BondingCurvePool, PoolKey};
use bancor_ledger::{Context, ParamSubspace, ParameterStore};

const POOL_PREFIX: &str = "bancorlite/pool/";

/// Pool and parameter storage.
#[derive(Debug, Clone, Copy)]
pub struct PoolRegistry {
    params: ParamSubspace,
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: ParamSubspace::new(MODULE_NAME),
        }
    }

    fn store_key(key: &PoolKey) -> Vec<u8> {
        format!("{POOL_PREFIX}{key}").into_bytes()
    }

    /// Checks whether a pool is stored under `key`.
    pub fn exists(&self, ctx: &Context<'_>, key: &PoolKey) -> bool {
        ctx.store().has(&Self::store_key(key))
    }

    /// Loads the pool stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the stored record cannot be decoded.
    pub fn load(&self, ctx: &Context<'_>, key: &PoolKey) -> Result<Option<BondingCurvePool>, BancorError> {
        ctx.store()
            .get(&Self::store_key(key))
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(|e| BancorError::Codec(e.to_string()))
    }

    /// Creates or replaces a pool record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be encoded.
    pub fn save(&self, ctx: &mut Context<'_>, pool: &BondingCurvePool) -> Result<(), BancorError> {
        let bytes = serde_json::to_vec(pool).map_err(|e| BancorError::Codec(e.to_string()))?;
        ctx.store_mut().set(&Self::store_key(&pool.key()), bytes);
        Ok(())
    }

    /// Deletes a pool record.
    pub fn remove(&self, ctx: &mut Context<'_>, pool: &BondingCurvePool) {
        ctx.store_mut().delete(&Self::store_key(&pool.key()));
    }

    /// All pools in key order.
    ///
    /// # Errors
    /// Returns an error if a stored record cannot be decoded.
    pub fn iter(&self, ctx: &Context<'_>) -> Result<Vec<BondingCurvePool>, BancorError> {
        ctx.store()
            .scan_prefix(POOL_PREFIX.as_bytes())
            .into_iter()
            .map(|(_, bytes)| {
                serde_json::from_slice(&bytes).map_err(|e| BancorError::Codec(e.to_string()))
            })
            .collect()
    }

    /// Module parameters, defaults if never set.
    ///
    /// # Errors
    /// Returns an error if the stored record cannot be decoded.
    pub fn params(&self, ctx: &Context<'_>) -> Result<BancorParams, BancorError> {
        Ok(self.params.load::<BancorParams>(ctx)?.unwrap_or_default())
    }

    /// Replaces the module parameters.
    ///
    /// # Errors
    /// Returns an error if the parameters are invalid.
    pub fn set_params(&self, ctx: &mut Context<'_>, params: &BancorParams) -> Result<(), BancorError> {
        params.validate()?;
        self.params.store(ctx, params)?;
        Ok(())
    }
}
