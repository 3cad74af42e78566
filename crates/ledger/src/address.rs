use serde::{Deserialize, Serialize};
use std::fmt;

const MODULE_PREFIX: &str = "module:";

/// Account address on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Address of the account owned by a module (escrow, fee collector).
    pub fn module(name: &str) -> Self {
        Self(format!("{MODULE_PREFIX}{name}"))
    }

    /// Whether this is a module account rather than a user account.
    pub fn is_module(&self) -> bool {
        self.0.starts_with(MODULE_PREFIX)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_accounts() {
        let escrow = Address::module("bancorlite");
        assert_eq!(escrow.as_str(), "module:bancorlite");
        assert!(escrow.is_module());
        assert!(!Address::from("alice").is_module());
        assert!(!Address::from("modulex").is_module());
    }
}
