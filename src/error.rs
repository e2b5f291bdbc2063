//! Error types for the cache store, the fetch collaborator and the coordinator.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing a cache entry
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entry exists for the key. The coordinator treats this as a miss.
    #[error("no cache entry at {}", path.display())]
    NotFound { path: PathBuf },

    /// The entry exists but could not be decoded
    #[error("corrupt cache entry at {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other filesystem failure (permissions, missing directory, ...)
    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode cache entry: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Failure retrieving or parsing a feed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// A file:// URL naming a remote host or otherwise not mappable to a local path
    #[error("file URL does not name a local path: {0}")]
    NonLocalFile(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed: {0}")]
    Parse(#[from] rss::Error),
}

/// Failure of a cached fetch
#[derive(Debug, Error)]
pub enum FeedCacheError {
    /// Reading the existing entry failed for a reason other than absence
    #[error("cache read failed")]
    Read(#[source] StoreError),

    #[error("fetch failed")]
    Fetch(#[source] FetchError),

    /// The feed was fetched but could not be persisted
    #[error("fetched feed could not be cached")]
    Write(#[source] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_is_not_found() {
        let err = StoreError::NotFound {
            path: PathBuf::from("/tmp/x.json"),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/tmp/x.json"));

        let err = StoreError::Io {
            path: PathBuf::from("/tmp/x.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_feed_cache_error_keeps_source() {
        let err = FeedCacheError::Fetch(FetchError::Status {
            url: "http://example.com/rss".to_string(),
            status: 503,
        });
        let source = err.source().expect("source present");
        assert!(source.to_string().contains("503"));
    }
}
