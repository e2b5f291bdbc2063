//! Cache module - digest-keyed on-disk feed cache
//!
//! Provides:
//! - Cache key derivation (MD5 of the feed URL)
//! - Entry storage (one JSON file per key, atomic replace)
//! - Cache-or-fetch coordination with a freshness window
//! - Optional per-key locking for concurrent callers

pub mod coordinator;
pub mod key;
pub mod lock;
pub mod store;

pub use coordinator::{cached_feed, CacheCoordinator, CachedFeed};
pub use key::derive_key;
pub use lock::{KeyLocks, LockedCoordinator};
pub use store::CacheStore;
