//! Cache key derivation
//!
//! The key is the MD5 digest of the URL's raw bytes in lowercase hex. It is
//! fixed-width and filesystem-safe, and identical across runs and platforms.

/// Extension of cache entry files
pub const ENTRY_EXTENSION: &str = "json";

/// Derive the cache key for a feed URL
pub fn derive_key(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

/// File name of the cache entry for a key
pub fn entry_file_name(key: &str) -> String {
    format!("{}.{}", key, ENTRY_EXTENSION)
}
