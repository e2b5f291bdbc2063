//! Per-key mutual exclusion around the coordinator
//!
//! The coordinator itself does no locking: two callers racing on one URL may
//! both fetch. Wrapping it in [`LockedCoordinator`] serializes requests per
//! cache key within a process, so the second caller finds the first one's
//! entry and gets a hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::TimeDelta;

use crate::cache::coordinator::{CacheCoordinator, CachedFeed};
use crate::cache::key::derive_key;
use crate::error::FeedCacheError;
use crate::fetch::FeedFetcher;

/// Lock table keyed by cache key
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for a key, created on first use
    pub fn handle(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    /// Drop the table entry for `key` if `handle` is its last outside holder
    pub fn release(&self, key: &str, handle: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // one reference in the table, one in `handle`; handles are only
        // cloned under the table lock, so the count cannot grow meanwhile
        let unused = locks
            .get(key)
            .is_some_and(|held| Arc::ptr_eq(held, &handle) && Arc::strong_count(&handle) == 2);
        if unused {
            locks.remove(key);
        }
    }

    /// Number of keys that currently have a lock
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    // the guarded value is (), so a poisoned lock carries no broken state
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Coordinator with at-most-one-fetch-per-key semantics inside one process
#[derive(Debug)]
pub struct LockedCoordinator<F> {
    inner: CacheCoordinator<F>,
    locks: KeyLocks,
}

impl<F: FeedFetcher> LockedCoordinator<F> {
    pub fn new(inner: CacheCoordinator<F>) -> Self {
        Self {
            inner,
            locks: KeyLocks::new(),
        }
    }

    pub fn get_feed_with_status(
        &self,
        url: &str,
        freshness: TimeDelta,
    ) -> Result<CachedFeed, FeedCacheError> {
        let key = derive_key(url);
        let handle = self.locks.handle(&key);
        let result = {
            let _guard = acquire(&handle);
            self.inner.get_feed_with_status(url, freshness)
        };
        self.locks.release(&key, handle);
        result
    }
}
