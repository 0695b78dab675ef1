// Fixed-capacity least-recently-used cache keyed by symbol.
use crate::error::{EngineError, Result};
use lru::LruCache;
use shared::models::Symbol;
use std::num::NonZeroUsize;

pub struct BoundedCache<V> {
    inner: LruCache<Symbol, V>,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| EngineError::ConfigError("cache capacity must be at least 1".to_string()))?;
        Ok(Self { inner: LruCache::new(capacity) })
    }

    /// Marks the entry as most recently used.
    pub fn get(&mut self, key: &Symbol) -> Option<V> {
        self.inner.get(key).cloned()
    }

    /// Returns the entry evicted to make room, if any.
    pub fn insert(&mut self, key: Symbol, value: V) -> Option<(Symbol, V)> {
        self.inner.push(key, value).filter(|(evicted, _)| !self.inner.contains(evicted))
    }

    pub fn contains(&self, key: &Symbol) -> bool {
        self.inner.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }
}
