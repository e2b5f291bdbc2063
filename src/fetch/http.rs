//! reqwest-backed feed fetcher
//!
//! http/https go over the network with a blocking client. file:// URLs are
//! read straight from disk, which is handy for local feeds and tests.

use std::path::PathBuf;

use reqwest::blocking::Client;
use url::Url;

use crate::core::model::FeedDocument;
use crate::error::FetchError;
use crate::fetch::convert::parse_rss;
use crate::fetch::FeedFetcher;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("feedcache/", env!("CARGO_PKG_VERSION"));

/// Fetcher for http, https and file URLs
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    fn fetch_file(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::NonLocalFile(url.to_string()))?;
        log::debug!("reading local feed {:?}", path);
        read_local(path)
    }
}

fn read_local(path: PathBuf) -> Result<Vec<u8>, FetchError> {
    std::fs::read(&path).map_err(|source| FetchError::Io { path, source })
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let body = match parsed.scheme() {
            "http" | "https" => self.fetch_http(&parsed)?,
            "file" => self.fetch_file(&parsed)?,
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        };

        Ok(parse_rss(&body)?)
    }
}
