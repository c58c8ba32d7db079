//! Error types for the DNS cache.
//!
//! The cache operations themselves are total; these errors only surface while
//! loading configuration or bootstrapping the root cache from zone data.

use thiserror::Error;

/// Represents errors that can occur while setting up a DNS cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Zone data could not be parsed.
    #[error("Zone error: {0}")]
    Zone(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}
