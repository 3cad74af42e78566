//! Token registry: issued denominations and their freezes.

use crate::address::Address;
use crate::bank::AccountLedger;
use crate::context::Context;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use tracing::info;

const TOKEN_PREFIX: &str = "asset/token/";
const FORBIDDEN_PREFIX: &str = "asset/forbidden/";

/// Token permission interface consumed by the AMM.
pub trait AssetRegistry {
    /// Whether `denom` is an issued token.
    fn exists(&self, ctx: &Context<'_>, denom: &str) -> bool;

    /// Whether the issuer of `denom` froze it for `address`.
    fn is_forbidden_for_sender(&self, ctx: &Context<'_>, denom: &str, address: &Address) -> bool;

    /// Whether the issuer of `denom` froze it for everyone.
    fn is_globally_forbidden(&self, ctx: &Context<'_>, denom: &str) -> bool;
}

/// Issued token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub owner: Address,
    pub total_supply: u128,
    /// Issuer may freeze the token or individual addresses.
    pub forbiddable: bool,
    pub is_forbidden: bool,
}

impl TokenInfo {
    pub fn new(symbol: impl Into<String>, owner: Address, total_supply: u128, forbiddable: bool) -> Self {
        Self {
            symbol: symbol.into(),
            owner,
            total_supply,
            forbiddable,
            is_forbidden: false,
        }
    }
}

/// Store-backed token registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenRegistry;

impl TokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn token_key(symbol: &str) -> Vec<u8> {
        format!("{TOKEN_PREFIX}{symbol}").into_bytes()
    }

    fn forbidden_key(symbol: &str, address: &Address) -> Vec<u8> {
        format!("{FORBIDDEN_PREFIX}{symbol}/{address}").into_bytes()
    }

    /// Loads a token record.
    pub fn token(&self, ctx: &Context<'_>, symbol: &str) -> Result<Option<TokenInfo>, LedgerError> {
        ctx.store()
            .get(&Self::token_key(symbol))
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(LedgerError::from)
    }

    fn save(&self, ctx: &mut Context<'_>, token: &TokenInfo) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(token)?;
        ctx.store_mut().set(&Self::token_key(&token.symbol), bytes);
        Ok(())
    }

    /// Registers a token and credits the whole supply to its owner.
    pub fn issue(
        &self,
        ctx: &mut Context<'_>,
        bank: &impl AccountLedger,
        token: TokenInfo,
    ) -> Result<(), LedgerError> {
        if self.token(ctx, &token.symbol)?.is_some() {
            return Err(LedgerError::TokenExists(token.symbol));
        }
        bank.mint(ctx, &token.owner, &token.symbol, token.total_supply)?;
        self.save(ctx, &token)?;
        info!(symbol = %token.symbol, owner = %token.owner, supply = token.total_supply, "Token issued");
        Ok(())
    }

    /// Freezes a token for every holder.
    pub fn forbid_token(&self, ctx: &mut Context<'_>, symbol: &str) -> Result<(), LedgerError> {
        let mut token = self
            .token(ctx, symbol)?
            .ok_or_else(|| LedgerError::TokenNotFound(symbol.to_string()))?;
        token.is_forbidden = true;
        self.save(ctx, &token)
    }

    /// Lifts a global freeze.
    pub fn unforbid_token(&self, ctx: &mut Context<'_>, symbol: &str) -> Result<(), LedgerError> {
        let mut token = self
            .token(ctx, symbol)?
            .ok_or_else(|| LedgerError::TokenNotFound(symbol.to_string()))?;
        token.is_forbidden = false;
        self.save(ctx, &token)
    }

    /// Freezes a token for the given addresses.
    pub fn forbid_addresses(
        &self,
        ctx: &mut Context<'_>,
        symbol: &str,
        addresses: &[Address],
    ) -> Result<(), LedgerError> {
        if self.token(ctx, symbol)?.is_none() {
            return Err(LedgerError::TokenNotFound(symbol.to_string()));
        }
        for address in addresses {
            ctx.store_mut().set(&Self::forbidden_key(symbol, address), vec![1]);
        }
        Ok(())
    }
}

impl AssetRegistry for TokenRegistry {
    fn exists(&self, ctx: &Context<'_>, denom: &str) -> bool {
        ctx.store().has(&Self::token_key(denom))
    }

    fn is_forbidden_for_sender(&self, ctx: &Context<'_>, denom: &str, address: &Address) -> bool {
        match self.token(ctx, denom) {
            Ok(Some(token)) => {
                token.forbiddable
                    && token.owner != *address
                    && ctx.store().has(&Self::forbidden_key(denom, address))
            }
            _ => false,
        }
    }

    fn is_globally_forbidden(&self, ctx: &Context<'_>, denom: &str) -> bool {
        matches!(self.token(ctx, denom), Ok(Some(token)) if token.is_forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Bank;
    use crate::context::BlockHeader;
    use crate::store::MemStore;

    #[test]
    fn test_issue_and_freeze() {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let registry = TokenRegistry::new();
        let bank = Bank::new();
        let issuer = Address::from("issuer");
        let user = Address::from("user");

        registry
            .issue(&mut ctx, &bank, TokenInfo::new("abc", issuer.clone(), 1_000, true))
            .unwrap();
        assert!(registry.exists(&ctx, "abc"));
        assert!(!registry.exists(&ctx, "xyz"));
        assert_eq!(bank.balance(&ctx, &issuer, "abc").unwrap(), 1_000);

        registry
            .forbid_addresses(&mut ctx, "abc", &[user.clone(), issuer.clone()])
            .unwrap();
        assert!(registry.is_forbidden_for_sender(&ctx, "abc", &user));
        // issuer is never frozen out of its own token
        assert!(!registry.is_forbidden_for_sender(&ctx, "abc", &issuer));

        assert!(!registry.is_globally_forbidden(&ctx, "abc"));
        registry.forbid_token(&mut ctx, "abc").unwrap();
        assert!(registry.is_globally_forbidden(&ctx, "abc"));
        registry.unforbid_token(&mut ctx, "abc").unwrap();
        assert!(!registry.is_globally_forbidden(&ctx, "abc"));
    }

    #[test]
    fn test_issue_twice_fails() {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let registry = TokenRegistry::new();
        let bank = Bank::new();
        let token = TokenInfo::new("abc", Address::from("a"), 1, false);

        registry.issue(&mut ctx, &bank, token.clone()).unwrap();
        assert_eq!(
            registry.issue(&mut ctx, &bank, token),
            Err(LedgerError::TokenExists("abc".to_string()))
        );
    }

    #[test]
    fn test_unforbiddable_token_ignores_address_freeze() {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let registry = TokenRegistry::new();
        let user = Address::from("user");

        registry
            .issue(&mut ctx, &Bank::new(), TokenInfo::new("abc", Address::from("a"), 1, false))
            .unwrap();
        registry.forbid_addresses(&mut ctx, "abc", &[user.clone()]).unwrap();
        assert!(!registry.is_forbidden_for_sender(&ctx, "abc", &user));
    }
}
