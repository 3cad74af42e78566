//! Versioned module parameters kept in the ledger store.

use crate::context::Context;
use crate::error::LedgerError;
use serde::Serialize;
use serde::de::DeserializeOwned;

const PARAMS_PREFIX: &str = "params/";

/// Typed access to a module's parameter record.
pub trait ParameterStore {
    /// Loads the parameter record, `None` if never set.
    fn load<T: DeserializeOwned>(&self, ctx: &Context<'_>) -> Result<Option<T>, LedgerError>;

    /// Replaces the parameter record.
    fn store<T: Serialize>(&self, ctx: &mut Context<'_>, params: &T) -> Result<(), LedgerError>;
}

/// Parameter record namespaced by module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSubspace {
    name: &'static str,
}

impl ParamSubspace {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn key(&self) -> Vec<u8> {
        format!("{PARAMS_PREFIX}{}", self.name).into_bytes()
    }
}

impl ParameterStore for ParamSubspace {
    fn load<T: DeserializeOwned>(&self, ctx: &Context<'_>) -> Result<Option<T>, LedgerError> {
        ctx.store()
            .get(&self.key())
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(LedgerError::from)
    }

    fn store<T: Serialize>(&self, ctx: &mut Context<'_>, params: &T) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(params)?;
        ctx.store_mut().set(&self.key(), bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BlockHeader;
    use crate::store::MemStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Limits {
        max: u64,
    }

    #[test]
    fn test_subspace_roundtrip() {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let subspace = ParamSubspace::new("demo");

        assert_eq!(subspace.load::<Limits>(&ctx).unwrap(), None);
        subspace.store(&mut ctx, &Limits { max: 9 }).unwrap();
        assert_eq!(subspace.load::<Limits>(&ctx).unwrap(), Some(Limits { max: 9 }));
        assert_eq!(subspace.name(), "demo");
    }
}
