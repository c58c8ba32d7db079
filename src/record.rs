//! DNS resource records as seen by the cache.
//!
//! The cache stores records opaquely; only the expiry matters to it. The
//! conversion from hickory's record model lives here too since the bootstrap
//! root cache is the only producer of records inside this crate.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hickory_proto::rr::RData;

/// A single DNS resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Fully qualified, lower-case owner name.
    pub name: String,

    /// Record type mnemonic, e.g. `A` or `NS`.
    pub rtype: String,

    /// Presentation-format value; meaning depends on `rtype`.
    pub value: String,

    /// Absolute time after which the record is stale.
    pub expiry: DateTime<Utc>,
}

impl Record {
    /// Create a record without a meaningful expiry.
    pub fn new(name: &str, rtype: &str, value: &str) -> Self {
        Self {
            name: to_lower_fqdn(name),
            rtype: rtype.to_ascii_uppercase(),
            value: value.to_string(),
            expiry: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Return the record with its expiry set to `expiry`.
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry;
        self
    }

    /// Cache key addressing this record's set.
    pub fn key(&self) -> Key {
        Key::new(&self.name, &self.rtype)
    }

    /// Convert a record parsed by hickory into a cache record.
    ///
    /// Returns `None` for record types the resolver does not use. When
    /// `expire` is false the record never goes stale on its own (expiry is
    /// the Unix epoch).
    pub fn from_hickory(record: &hickory_proto::rr::Record, expire: bool) -> Option<Record> {
        let value = match record.data() {
            RData::A(a) => a.0.to_string(),
            RData::AAAA(aaaa) => aaaa.0.to_string(),
            RData::NS(ns) => to_lower_fqdn(&ns.0.to_utf8()),
            RData::CNAME(canonical) => to_lower_fqdn(&canonical.0.to_utf8()),
            RData::SOA(soa) => to_lower_fqdn(&soa.mname().to_utf8()),
            RData::TXT(txt) => txt
                .txt_data()
                .iter()
                .map(|s| String::from_utf8_lossy(s))
                .collect::<Vec<_>>()
                .join("\t"),
            _ => return None,
        };
        let expiry = if expire {
            after(Utc::now(), Duration::from_secs(u64::from(record.ttl())))
        } else {
            DateTime::<Utc>::UNIX_EPOCH
        };

        Some(Record {
            name: to_lower_fqdn(&record.name().to_utf8()),
            rtype: record.record_type().to_string(),
            value,
            expiry,
        })
    }
}

/// Identifies one cache slot: a (query name, query type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    qname: String,
    qtype: String,
}

impl Key {
    /// Build a key; the name is lower-cased and made fully qualified, the
    /// type upper-cased.
    pub fn new(qname: &str, qtype: &str) -> Self {
        Self {
            qname: to_lower_fqdn(qname),
            qtype: qtype.to_ascii_uppercase(),
        }
    }

    pub fn qname(&self) -> &str {
        &self.qname
    }

    pub fn qtype(&self) -> &str {
        &self.qtype
    }
}

/// Lower-case a name and make sure it ends with the root label.
pub fn to_lower_fqdn(name: &str) -> String {
    let mut out = name.to_ascii_lowercase();
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// `at + ttl`, saturating at the largest representable time.
pub(crate) fn after(at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| at.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
