//! Feed fetching
//!
//! [`FeedFetcher`] is the seam between the cache and the network. The cache
//! never looks inside a fetch; it only stores what comes back.
//!
//! Provides:
//! - http: reqwest-backed fetcher for http/https/file URLs
//! - convert: rss::Channel -> FeedDocument mapping

pub mod convert;
pub mod http;

use chrono::Utc;

use crate::core::model::{CachedEntry, FeedDocument};
use crate::error::FetchError;

pub use http::HttpFetcher;

/// Retrieves and parses a feed document from a URL.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError>;
}

impl<F: FeedFetcher + ?Sized> FeedFetcher for &F {
    fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError> {
        (**self).fetch(url)
    }
}

/// Fetch a feed and stamp it with the completion time, bypassing the cache
pub fn fetch_feed<F: FeedFetcher + ?Sized>(fetcher: &F, url: &str) -> Result<CachedEntry, FetchError> {
    let feed = fetcher.fetch(url)?;
    Ok(CachedEntry::new(url, feed, Utc::now()))
}
