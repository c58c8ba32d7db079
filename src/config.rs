//! Configuration for the DNS cache.
//!
//! This module defines the configuration structure and methods to load
//! configuration from environment variables.

use std::{env, time::Duration};

use crate::cache::MIN_CACHE_CAPACITY;
use crate::errors::CacheError;

/// Default negative-caching TTL in seconds.
pub const DEFAULT_NEGATIVE_TTL: u64 = 30;

/// Cache configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached keys.
    pub capacity: usize,

    /// Whether lookups hide entries whose expiry has passed.
    pub expire: bool,

    /// How long an empty answer is cached.
    pub negative_ttl: Duration,

    /// Optional ceiling for positive answers.
    pub max_ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: MIN_CACHE_CAPACITY,
            expire: true,
            negative_ttl: Duration::from_secs(DEFAULT_NEGATIVE_TTL),
            max_ttl: None,
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment variables.
    ///
    /// Reads `DNS_CACHE_CAPACITY`, `DNS_CACHE_EXPIRE`, `DNS_NEGATIVE_TTL` and
    /// `DNS_MAX_TTL` (seconds). Unset variables fall back to the defaults.
    ///
    /// # Returns
    /// A `Result` containing either the loaded `CacheConfig` or a `CacheError`.
    pub fn from_env() -> Result<Self, CacheError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CacheError> {
        let defaults = Self::default();

        let capacity = match lookup("DNS_CACHE_CAPACITY") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| CacheError::Config(format!("Invalid DNS_CACHE_CAPACITY {v:?}")))?,
            None => defaults.capacity,
        };

        let expire = match lookup("DNS_CACHE_EXPIRE") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| CacheError::Config(format!("Invalid DNS_CACHE_EXPIRE {v:?}")))?,
            None => defaults.expire,
        };

        let negative_ttl = match lookup("DNS_NEGATIVE_TTL") {
            Some(v) => Duration::from_secs(parse_secs("DNS_NEGATIVE_TTL", &v)?),
            None => defaults.negative_ttl,
        };

        let max_ttl = lookup("DNS_MAX_TTL")
            .map(|v| parse_secs("DNS_MAX_TTL", &v).map(Duration::from_secs))
            .transpose()?;

        Ok(Self {
            capacity,
            expire,
            negative_ttl,
            max_ttl,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value == "1" || value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_secs(name: &str, value: &str) -> Result<u64, CacheError> {
    value
        .trim()
        .parse()
        .map_err(|_| CacheError::Config(format!("Invalid {name} {value:?}")))
}
