//! Errors raised by ledger collaborators.

/// Ledger errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Account does not hold enough of a denomination.
    #[error("insufficient funds: {address} holds {available} {denom}, needs {required}")]
    InsufficientFunds {
        /// Debited account.
        address: String,
        /// Denomination.
        denom: String,
        /// Current balance.
        available: u128,
        /// Requested amount.
        required: u128,
    },
    /// Balance arithmetic overflowed.
    #[error("balance overflow for {denom}")]
    Overflow {
        /// Denomination.
        denom: String,
    },
    /// A stored value could not be decoded or encoded.
    #[error("codec error: {0}")]
    Codec(String),
    /// Token already registered.
    #[error("token {0} already exists")]
    TokenExists(String),
    /// Token is not registered.
    #[error("token {0} not found")]
    TokenNotFound(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}
