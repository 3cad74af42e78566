//! Execution context for a single ledger transaction.

use crate::store::{CacheStore, KvStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header of the block being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block height.
    pub height: u64,
    /// Block time in unix seconds.
    pub time: i64,
}

impl BlockHeader {
    #[must_use]
    pub fn new(height: u64, time: i64) -> Self {
        Self { height, time }
    }
}

/// Source of ledger time. Never wall-clock.
pub trait BlockClock {
    /// Current block time in unix seconds.
    fn block_time(&self) -> i64;
    /// Current block height.
    fn block_height(&self) -> u64;
}

/// Store view plus block header handed to every keeper call.
pub struct Context<'a> {
    store: &'a mut dyn KvStore,
    header: BlockHeader,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut dyn KvStore, header: BlockHeader) -> Self {
        Self { store, header }
    }

    #[must_use]
    pub fn header(&self) -> BlockHeader {
        self.header
    }

    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn KvStore {
        &mut *self.store
    }

    /// Runs `f` in a nested cache-wrap. Writes reach this context only if
    /// `f` returns `Ok`.
    pub fn atomic<T, E>(
        &mut self,
        f: impl FnOnce(&mut Context<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        run_atomic(&mut *self.store, self.header, f)
    }
}

impl BlockClock for Context<'_> {
    fn block_time(&self) -> i64 {
        self.header.time
    }

    fn block_height(&self) -> u64 {
        self.header.height
    }
}

/// Applies `f` against a cache-wrapped view of `store`, committing only on
/// success.
pub fn run_atomic<S, T, E>(
    store: &mut S,
    header: BlockHeader,
    f: impl FnOnce(&mut Context<'_>) -> Result<T, E>,
) -> Result<T, E>
where
    S: KvStore + ?Sized,
{
    let mut cache = CacheStore::new(store);
    let result = {
        let mut ctx = Context::new(&mut cache, header);
        f(&mut ctx)
    };
    match result {
        Ok(value) => {
            cache.write();
            Ok(value)
        }
        Err(err) => {
            debug!(
                height = header.height,
                discarded = cache.pending(),
                "Discarding cache-wrapped writes"
            );
            Err(err)
        }
    }
}
