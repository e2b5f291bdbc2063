//! feedcache - RSS feeds behind a digest-keyed on-disk cache
//!
//! A feed is fetched once, written to `<cache_dir>/<md5(url)>.json` together
//! with its fetch time, and served from there until it is older than the
//! caller's freshness window.
//!
//! ```no_run
//! use chrono::TimeDelta;
//! use feedcache::{cached_feed, HttpFetcher};
//!
//! # fn main() -> anyhow::Result<()> {
//! let fetcher = HttpFetcher::new()?;
//! let entry = cached_feed(fetcher, "https://blog.rust-lang.org/feed.xml", "/tmp", TimeDelta::hours(1))?;
//! println!("{} ({} items)", entry.feed.title, entry.feed.items.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod core;
pub mod error;
pub mod fetch;
pub mod logging;

pub use cache::{cached_feed, derive_key, CacheCoordinator, CacheStore, CachedFeed, LockedCoordinator};
pub use crate::core::model::{CacheStatus, CachedEntry, FeedDocument, FeedItem};
pub use error::{FeedCacheError, FetchError, StoreError};
pub use fetch::{fetch_feed, FeedFetcher, HttpFetcher};
