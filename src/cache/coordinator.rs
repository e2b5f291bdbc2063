//! Cache-or-fetch coordination
//!
//! Sequence per request: derive key, read store, check age, fetch on
//! miss/stale, write back. Nothing is retried and no store error other than
//! "absent" is downgraded to a miss.

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};

use crate::cache::key::derive_key;
use crate::cache::store::CacheStore;
use crate::core::model::{CacheStatus, CachedEntry};
use crate::error::FeedCacheError;
use crate::fetch::FeedFetcher;

/// Result of a cached fetch, with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub status: CacheStatus,
    pub key: String,
    pub path: PathBuf,
    pub entry: CachedEntry,
}

/// Serves feeds from a [`CacheStore`], fetching through `F` when needed.
#[derive(Debug, Clone)]
pub struct CacheCoordinator<F> {
    store: CacheStore,
    fetcher: F,
}

impl<F: FeedFetcher> CacheCoordinator<F> {
    pub fn new(store: CacheStore, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Return the cached entry for `url` if it is at most `freshness` old,
    /// otherwise fetch, cache and return a new one.
    pub fn get_feed(&self, url: &str, freshness: TimeDelta) -> Result<CachedEntry, FeedCacheError> {
        self.get_feed_with_status(url, freshness).map(|c| c.entry)
    }

    /// Like [`get_feed`](Self::get_feed), also reporting hit/miss/stale
    pub fn get_feed_with_status(
        &self,
        url: &str,
        freshness: TimeDelta,
    ) -> Result<CachedFeed, FeedCacheError> {
        self.get_feed_at(url, freshness, Utc::now)
    }

    /// Core algorithm with an injectable clock. `now` is sampled once for the
    /// age check and once more when a fetch completes.
    pub(crate) fn get_feed_at(
        &self,
        url: &str,
        freshness: TimeDelta,
        now: impl Fn() -> DateTime<Utc>,
    ) -> Result<CachedFeed, FeedCacheError> {
        let key = derive_key(url);
        let path = self.store.entry_path(&key);

        let status = match self.store.read(&key) {
            Ok(entry) => {
                let age = entry.age_at(now());
                if age <= freshness {
                    log::debug!("cache hit for {} (age {}s)", url, age.num_seconds());
                    return Ok(CachedFeed {
                        status: CacheStatus::Hit,
                        key,
                        path,
                        entry,
                    });
                }
                log::debug!("cache stale for {} (age {}s)", url, age.num_seconds());
                CacheStatus::Stale
            }
            Err(e) if e.is_not_found() => {
                log::debug!("cache miss for {}", url);
                CacheStatus::Miss
            }
            Err(e) => return Err(FeedCacheError::Read(e)),
        };

        let feed = self.fetcher.fetch(url).map_err(FeedCacheError::Fetch)?;
        let entry = CachedEntry::new(url, feed, now());
        log::debug!("fetched {} ({} items)", url, entry.feed.items.len());

        self.store
            .write(&key, &entry)
            .map_err(FeedCacheError::Write)?;

        Ok(CachedFeed {
            status,
            key,
            path,
            entry,
        })
    }
}

/// One-shot cached fetch against `cache_dir`
pub fn cached_feed<F: FeedFetcher>(
    fetcher: F,
    url: &str,
    cache_dir: impl Into<PathBuf>,
    freshness: TimeDelta,
) -> Result<CachedEntry, FeedCacheError> {
    CacheCoordinator::new(CacheStore::new(cache_dir), fetcher).get_feed(url, freshness)
}
