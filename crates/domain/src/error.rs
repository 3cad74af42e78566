//! Failure codes of the bonding-curve module.
//!
//! Every fallible operation returns [`BancorError`]. Variants fall into three
//! groups: validation errors detected before any state is read, state errors
//! detected after a lookup, and execution errors raised while applying a
//! trade. None of them leave partial effects behind.

use bancor_ledger::LedgerError;

/// Code space reported alongside [`BancorError::code`].
pub const CODE_SPACE: &str = "bancorlite";

/// Bonding-curve module errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BancorError {
    /// Owner or sender address is empty.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// Denomination is malformed, unregistered or not allowed in this position.
    #[error("invalid symbol")]
    InvalidSymbol,
    /// Max supply must be positive.
    #[error("max supply must be positive")]
    NonPositiveSupply,
    /// Max price must be positive and init price non-negative.
    #[error("price must be positive")]
    NonPositivePrice,
    /// Curve would slope downwards.
    #[error("max price is below init price")]
    MaxPriceBelowInitPrice,
    /// Trade amount must be positive.
    #[error("trade amount must be positive")]
    NonPositiveAmount,
    /// Trade amount exceeds the module limit.
    #[error("trade amount is too large")]
    TradeAmountTooLarge,
    /// No pool exists for the pair.
    #[error("no bancor pool exists for this pair")]
    NoBancorExists,
    /// A pool already exists for the pair.
    #[error("bancor pool already exists for this pair")]
    PoolAlreadyExists,
    /// Requester does not own the pool.
    #[error("only the pool owner may cancel it")]
    NotOwner,
    /// Block time is before the pool's enable-cancel time.
    #[error("pool cannot be cancelled before {enable_cancel_time} (now {now})")]
    CancelNotYetEnabled {
        /// Earliest cancel time.
        enable_cancel_time: i64,
        /// Current block time.
        now: i64,
    },
    /// Curve position would leave `[0, max_supply]`.
    #[error("reserve would move out of range")]
    ReserveOutOfRange,
    /// Buy costs more than the caller's limit.
    #[error("trade costs {cost}, exceeding money limit {limit}")]
    ExceedsMoneyLimit {
        /// Money the trade would cost.
        cost: u128,
        /// Caller's limit.
        limit: u128,
    },
    /// Sell yields less than the caller's limit.
    #[error("trade yields {proceeds}, below money limit {limit}")]
    BelowMoneyLimit {
        /// Money the trade would yield.
        proceeds: u128,
        /// Caller's limit.
        limit: u128,
    },
    /// Token owner froze the token.
    #[error("transfer has been forbidden by token owner")]
    TokenForbiddenByOwner,
    /// Account lacks the coins for a transfer.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    /// Arithmetic overflow while pricing.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// Stored record could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),
    /// Any other ledger failure.
    #[error("ledger error: {0}")]
    Ledger(String),
}

impl BancorError {
    /// Stable numeric code for programmatic branching.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidAddress(_) => 901,
            Self::InvalidSymbol => 902,
            Self::NonPositiveSupply => 903,
            Self::NonPositivePrice => 904,
            Self::MaxPriceBelowInitPrice => 905,
            Self::NonPositiveAmount => 906,
            Self::TradeAmountTooLarge => 907,
            Self::NoBancorExists => 910,
            Self::PoolAlreadyExists => 911,
            Self::NotOwner => 912,
            Self::CancelNotYetEnabled { .. } => 913,
            Self::ReserveOutOfRange => 920,
            Self::ExceedsMoneyLimit { .. } => 921,
            Self::BelowMoneyLimit { .. } => 922,
            Self::TokenForbiddenByOwner => 923,
            Self::InsufficientFunds(_) => 924,
            Self::ArithmeticOverflow => 925,
            Self::Codec(_) => 990,
            Self::Ledger(_) => 991,
        }
    }

    /// Raised before any state is read.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        (901..910).contains(&self.code())
    }

    /// Raised after a lookup, before any mutation.
    #[must_use]
    pub fn is_state(&self) -> bool {
        (910..920).contains(&self.code())
    }
}

impl From<LedgerError> for BancorError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { .. } => Self::InsufficientFunds(err.to_string()),
            LedgerError::Overflow { .. } => Self::ArithmeticOverflow,
            LedgerError::Codec(msg) => Self::Codec(msg),
            other => Self::Ledger(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(BancorError::InvalidSymbol.is_validation());
        assert!(BancorError::TradeAmountTooLarge.is_validation());
        assert!(BancorError::NoBancorExists.is_state());
        assert!(!BancorError::NoBancorExists.is_validation());
        assert!(!BancorError::TokenForbiddenByOwner.is_state());
    }

    #[test]
    fn test_ledger_error_mapping() {
        let err: BancorError = LedgerError::InsufficientFunds {
            address: "a".into(),
            denom: "cet".into(),
            available: 1,
            required: 2,
        }
        .into();
        assert_eq!(err.code(), 924);

        let err: BancorError = LedgerError::TokenNotFound("x".into()).into();
        assert!(matches!(err, BancorError::Ledger(_)));
    }
}
