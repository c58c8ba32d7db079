//! Bootstrap root cache.
//!
//! Root-server hints are compiled into the binary and loaded into a dedicated,
//! non-expiring cache at startup. The resolver consults it to find where to
//! begin iterating when its own cache has nothing better.

use std::ops::Deref;
use std::time::Duration;

use hickory_proto::rr::Name;
use hickory_proto::serialize::txt::Parser;
use log::{debug, info};

use crate::cache::Cache;
use crate::errors::CacheError;
use crate::record::Record;

/// Root hints in zone-file syntax.
pub const ROOT_ZONE: &str = include_str!("root.zone");

/// A cache preloaded with root-server records.
///
/// Built once during startup and handed out by reference; it is never
/// written to after loading.
#[derive(Debug)]
pub struct RootCache {
    cache: Cache,
}

impl RootCache {
    /// Load the built-in root hints.
    ///
    /// # Returns
    /// The loaded root cache, or the zone error if the embedded data does not
    /// parse. Callers should treat an error as fatal.
    pub fn load() -> Result<Self, CacheError> {
        Self::from_zone(ROOT_ZONE)
    }

    /// Build a root cache from arbitrary zone text.
    ///
    /// Capacity is the number of lines in `zone`, expiry is disabled and
    /// there is no negative TTL or TTL ceiling. Records of types the resolver
    /// does not use are skipped.
    pub fn from_zone(zone: &str) -> Result<Self, CacheError> {
        let cache = Cache::new(zone.matches('\n').count(), false, Duration::ZERO, None);

        let (_, rrsets) = Parser::new(zone, None, Some(Name::root()))
            .parse()
            .map_err(|e| CacheError::Zone(e.to_string()))?;

        let mut loaded = 0usize;
        for record in rrsets.values().flat_map(|rrset| rrset.records_without_rrsigs()) {
            match Record::from_hickory(record, false) {
                Some(rr) => {
                    cache.add(rr.key(), vec![rr]);
                    loaded += 1;
                }
                None => debug!("Skipping {} {} record in root hints", record.name(), record.record_type()),
            }
        }

        info!("Root cache loaded: {} records, {} keys", loaded, cache.len());
        Ok(Self { cache })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}

impl Deref for RootCache {
    type Target = Cache;

    fn deref(&self) -> &Cache {
        &self.cache
    }
}
