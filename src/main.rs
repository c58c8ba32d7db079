//! dnsr-cache
//!
//! Loads the root hints and a resolver cache the way a resolver does at
//! startup, then answers `NAME TYPE` pairs given on the command line: the
//! resolver cache is consulted first, misses fall back to the root cache and
//! the answer (possibly empty) is cached for later pairs.
//!
//! Usage: `dnsr-cache [NAME TYPE]...`

use std::{env, process};

use log::{error, info};

use dnsr_cache::{Cache, CacheConfig, CacheError, Key, Record, RootCache};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), CacheError> {
    // Load configuration from environment variables
    let config = CacheConfig::from_env()?;

    // Root hints are built in; failing to load them is a build defect
    let root = RootCache::load()?;

    let cache = Cache::from_config(&config);
    info!(
        "Resolver cache ready: capacity {}, expire {}, negative TTL {:?}, max TTL {:?}",
        cache.capacity(),
        config.expire,
        config.negative_ttl,
        config.max_ttl
    );

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() % 2 != 0 {
        return Err(CacheError::Config("expected NAME TYPE pairs".into()));
    }

    for pair in args.chunks(2) {
        let key = Key::new(&pair[0], &pair[1]);
        let (records, source) = lookup(&cache, &root, &key);

        if records.is_empty() {
            println!("{}\t{}\t; no records ({})", key.qname(), key.qtype(), source);
        }
        for rr in records {
            println!("{}\t{}\t{}\t; {}", rr.name, rr.rtype, rr.value, source);
        }
    }

    Ok(())
}

/// Answer from the resolver cache, or from the root cache on a miss. A root
/// answer, empty or not, is stored in the resolver cache.
fn lookup(cache: &Cache, root: &RootCache, key: &Key) -> (Vec<Record>, &'static str) {
    if let Some(records) = cache.get(key) {
        return (records, "cache");
    }
    let records = root.get(key).unwrap_or_default();
    cache.add(key.clone(), records.clone());
    (records, "root")
}
