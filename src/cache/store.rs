//! Cache store - Read/write cache entry files
//!
//! One `<key>.json` file per URL inside the cache directory. Writes go to a
//! temp file in the same directory and are renamed over the target, so a
//! reader sees either the old entry or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::cache::key::entry_file_name;
use crate::core::model::CachedEntry;
use crate::error::StoreError;

/// Directory-backed entry store
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// The directory is not created; it must exist and be writable for writes to succeed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the entry file for a key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(entry_file_name(key))
    }

    /// Read and decode the entry for a key
    pub fn read(&self, key: &str) -> Result<CachedEntry, StoreError> {
        let path = self.entry_path(key);
        log::trace!("reading cache entry {:?}", path);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Encode and persist the entry for a key, replacing any previous one
    pub fn write(&self, key: &str, entry: &CachedEntry) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        let json = serde_json::to_vec(entry).map_err(StoreError::Encode)?;
        log::trace!("writing cache entry {:?} ({} bytes)", path, json.len());

        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".feedcache-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;

        Ok(())
    }
}
