//! Feed and cache entry model
//!
//! Everything that lands on disk goes through these types, so their serde
//! shape is the cache file format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedImage {
    pub url: String,
    pub title: String,
    pub link: String,
}

/// Item GUID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedGuid {
    pub value: String,

    /// Whether the GUID is also a permanent link to the item
    #[serde(default)]
    pub permalink: bool,
}

/// Media attached to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEnclosure {
    pub url: String,
    /// Length in bytes, as published by the feed (kept verbatim)
    pub length: String,
    pub mime_type: String,
}

/// A single feed entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<FeedGuid>,

    /// Publication date as written in the feed (RFC 822 for RSS 2.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<FeedEnclosure>,
}

/// A parsed feed document
///
/// The shape follows the RSS 2.0 channel. Items keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_date: Option<String>,

    /// Publisher's suggested time-to-live in minutes (verbatim)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FeedImage>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(default)]
    pub items: Vec<FeedItem>,
}

/// A fetched feed plus the metadata of that fetch. This is the unit of caching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry {
    /// When the fetch completed (UTC, nanosecond precision)
    pub fetched_at: DateTime<Utc>,

    /// Source URL; informational, the lookup key is derived separately
    pub url: String,

    pub feed: FeedDocument,
}

impl CachedEntry {
    pub fn new(url: impl Into<String>, feed: FeedDocument, fetched_at: DateTime<Utc>) -> Self {
        Self {
            fetched_at,
            url: url.into(),
            feed,
        }
    }

    /// Age of the entry relative to `now`. Negative if `now` precedes the fetch.
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::TimeDelta {
        now - self.fetched_at
    }
}

/// How a request was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Fresh entry served from disk
    Hit,
    /// No entry on disk; fetched
    Miss,
    /// Entry on disk was too old; fetched
    Stale,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
            CacheStatus::Stale => "stale",
        }
    }
}
