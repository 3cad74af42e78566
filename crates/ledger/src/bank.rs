//! Account balances.

use crate::address::Address;
use crate::context::Context;
use crate::error::LedgerError;
use tracing::debug;

const BALANCE_PREFIX: &str = "bank/";

/// Balance keeper interface consumed by the AMM.
pub trait AccountLedger {
    /// Balance of `denom` held by `address`.
    fn balance(&self, ctx: &Context<'_>, address: &Address, denom: &str) -> Result<u128, LedgerError>;

    /// Moves `amount` of `denom` from `from` to `to`.
    fn transfer(
        &self,
        ctx: &mut Context<'_>,
        from: &Address,
        to: &Address,
        denom: &str,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Credits newly issued coins to `to`.
    fn mint(
        &self,
        ctx: &mut Context<'_>,
        to: &Address,
        denom: &str,
        amount: u128,
    ) -> Result<(), LedgerError>;
}

/// Store-backed balance keeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bank;

impl Bank {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn key(address: &Address, denom: &str) -> Vec<u8> {
        format!("{BALANCE_PREFIX}{address}/{denom}").into_bytes()
    }

    fn set_balance(ctx: &mut Context<'_>, address: &Address, denom: &str, amount: u128) {
        let key = Self::key(address, denom);
        if amount == 0 {
            ctx.store_mut().delete(&key);
        } else {
            ctx.store_mut().set(&key, amount.to_be_bytes().to_vec());
        }
    }

    /// All non-zero balances of `address`, ordered by denomination.
    pub fn balances(&self, ctx: &Context<'_>, address: &Address) -> Result<Vec<(String, u128)>, LedgerError> {
        let prefix = format!("{BALANCE_PREFIX}{address}/");
        ctx.store()
            .scan_prefix(prefix.as_bytes())
            .into_iter()
            .map(|(key, value)| {
                let denom = String::from_utf8_lossy(&key[prefix.len()..]).into_owned();
                decode_amount(&value).map(|amount| (denom, amount))
            })
            .collect()
    }

    fn sub_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        denom: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let available = self.balance(ctx, address, denom)?;
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                address: address.to_string(),
                denom: denom.to_string(),
                available,
                required: amount,
            })?;
        Self::set_balance(ctx, address, denom, remaining);
        Ok(())
    }

    fn add_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        denom: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let current = self.balance(ctx, address, denom)?;
        let updated = current.checked_add(amount).ok_or_else(|| LedgerError::Overflow {
            denom: denom.to_string(),
        })?;
        Self::set_balance(ctx, address, denom, updated);
        Ok(())
    }
}

fn decode_amount(bytes: &[u8]) -> Result<u128, LedgerError> {
    let raw: [u8; 16] = bytes
        .try_into()
        .map_err(|_| LedgerError::Codec(format!("balance has {} bytes", bytes.len())))?;
    Ok(u128::from_be_bytes(raw))
}

impl AccountLedger for Bank {
    fn balance(&self, ctx: &Context<'_>, address: &Address, denom: &str) -> Result<u128, LedgerError> {
        match ctx.store().get(&Self::key(address, denom)) {
            Some(bytes) => decode_amount(&bytes),
            None => Ok(0),
        }
    }

    fn transfer(
        &self,
        ctx: &mut Context<'_>,
        from: &Address,
        to: &Address,
        denom: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        self.sub_coins(ctx, from, denom, amount)?;
        self.add_coins(ctx, to, denom, amount)?;
        debug!(from = %from, to = %to, denom, amount, "Transferred coins");
        Ok(())
    }

    fn mint(
        &self,
        ctx: &mut Context<'_>,
        to: &Address,
        denom: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.add_coins(ctx, to, denom, amount)
    }
}
