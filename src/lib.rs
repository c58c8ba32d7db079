//! DNS record-set cache.
//!
//! This library provides the bounded, TTL-aware cache a recursive resolver
//! keeps between lookups, along with the root-hints cache it bootstraps from.

pub mod cache;
pub mod config;
pub mod errors;
pub mod record;
pub mod root;

// Re-export commonly used items
pub use cache::Cache;
pub use config::CacheConfig;
pub use errors::CacheError;
pub use record::{Key, Record};
pub use root::RootCache;
