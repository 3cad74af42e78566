use crate::registry::PoolRegistry;
use bancor_domain::MODULE_NAME;
use bancor_domain::error::BancorError;
use bancor_domain::params::BancorParams;
use bancor_ledger::{AccountLedger, Address, AssetRegistry, Bank, Context, TokenRegistry};

/// Module account holding pool inventory and collected money.
#[must_use]
pub fn escrow_address() -> Address {
    Address::module(MODULE_NAME)
}

/// Module account receiving pool creation fees.
#[must_use]
pub fn fee_collector_address() -> Address {
    Address::module("fee_collector")
}

/// Entry point of the module, wired to its ledger collaborators.
#[derive(Debug, Clone)]
pub struct Keeper<B = Bank, R = TokenRegistry> {
    pub(crate) registry: PoolRegistry,
    pub(crate) bank: B,
    pub(crate) assets: R,
}

impl Default for Keeper {
    fn default() -> Self {
        Self::new(Bank::new(), TokenRegistry::new())
    }
}

impl<B: AccountLedger, R: AssetRegistry> Keeper<B, R> {
    /// Creates a keeper over the given balance and token collaborators.
    pub fn new(bank: B, assets: R) -> Self {
        Self {
            registry: PoolRegistry::new(),
            bank,
            assets,
        }
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn assets(&self) -> &R {
        &self.assets
    }

    /// Current module parameters.
    pub fn params(&self, ctx: &Context<'_>) -> Result<BancorParams, BancorError> {
        self.registry.params(ctx)
    }

    /// Replaces the module parameters.
    pub fn set_params(&self, ctx: &mut Context<'_>, params: &BancorParams) -> Result<(), BancorError> {
        self.registry.set_params(ctx, params)
    }

    /// Both denominations must be issued tokens.
    pub(crate) fn ensure_registered(
        &self,
        ctx: &Context<'_>,
        stock: &str,
        money: &str,
    ) -> Result<(), BancorError> {
        if !self.assets.exists(ctx, stock) || !self.assets.exists(ctx, money) {
            return Err(BancorError::InvalidSymbol);
        }
        Ok(())
    }

    /// Rejects denominations frozen for `address`.
    pub(crate) fn ensure_not_forbidden(
        &self,
        ctx: &Context<'_>,
        denoms: &[&str],
        address: &Address,
    ) -> Result<(), BancorError> {
        for denom in denoms {
            if self.assets.is_forbidden_for_sender(ctx, denom, address)
                || self.assets.is_globally_forbidden(ctx, denom)
            {
                return Err(BancorError::TokenForbiddenByOwner);
            }
        }
        Ok(())
    }
}
