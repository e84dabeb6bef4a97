//! Caller-owned memoization for aggregate results.
//!
//! The dashboard recomputes every aggregate on each render pass but the
//! dataset is static, so results are memoized per (function, arguments).
//! Unlike the hidden process-wide cache this replaces, the cache here is
//! an explicit value the caller owns and injects; tests can `reset` it
//! between cases. There is no eviction — acceptable for a single static
//! dataset, not a design to extend.

use crate::error::ChurnResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    function: &'static str,
    args: String,
}

impl CacheKey {
    /// Key a computation by function name plus its serialized arguments.
    pub fn of<A: Serialize>(function: &'static str, args: &A) -> ChurnResult<Self> {
        Ok(Self {
            function,
            args: serde_json::to_string(args)?,
        })
    }
}

#[derive(Debug, Default)]
pub struct AggregateCache {
    entries: HashMap<CacheKey, serde_json::Value>,
    hits: u64,
    misses: u64,
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-through lookup: return the stored value for `key`, or run
    /// `compute`, store its result and return it.
    pub fn get_or_compute<T, F>(&mut self, key: CacheKey, compute: F) -> ChurnResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> ChurnResult<T>,
    {
        if let Some(stored) = self.entries.get(&key) {
            self.hits += 1;
            log::debug!("cache hit: {}({})", key.function, key.args);
            return Ok(serde_json::from_value(stored.clone())?);
        }

        self.misses += 1;
        log::debug!("cache miss: {}({})", key.function, key.args);
        let value = compute()?;
        self.entries.insert(key, serde_json::to_value(&value)?);
        Ok(value)
    }

    /// Drop every entry. Used between test cases and after a reload.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
