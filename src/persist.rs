//! Binary persistence that preserves recency order.
//!
//! # Format
//!
//! ```text
//! ┌──────────────┬──────────┬──────────┬─────┬──────────┬──────────┐
//! │ count: u64   │ key 0    │ value 0  │ ... │ key n-1  │ value n-1│
//! └──────────────┴──────────┴──────────┴─────┴──────────┴──────────┘
//!                  (most recently used)          (least recently used)
//! ```
//!
//! Keys and values use their `bincode::Encode` / `bincode::Decode` encodings under
//! [`storage_config`]. Neither the capacity nor the statistics are stored.
//!
//! # Restoring
//!
//! [`load`] reads every pair before building anything, then appends each pair at
//! the least recently used end of a fresh cache in the order read. Since pairs were
//! written most recent first, this reproduces the original order exactly. Any
//! decode error aborts the whole restore; no partially filled cache is returned.
//!
//! A restored cache starts with **all statistics at zero**: counters describe the
//! lifetime of one cache instance, not of the data in it.
//!
//! If the snapshot holds more entries than the target capacity, the least recently
//! used surplus is dropped. Dropped entries are not counted as evictions.
//!
//! # Example
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::{persist, ConcurrentLruCache};
//!
//! let cache = ConcurrentLruCache::new(3)?;
//! cache.put(1u32, "a".to_string());
//! cache.put(2, "b".to_string());
//! cache.put(3, "c".to_string());
//! cache.get(&1);
//!
//! let mut bytes = Vec::new();
//! persist::save(&cache, &mut bytes)?;
//!
//! let restored: ConcurrentLruCache<u32, String> =
//!     persist::load(&mut bytes.as_slice(), LruCacheConfig::new(3))?;
//! assert_eq!(restored.keys_snapshot(), vec![1, 3, 2]);
//! assert_eq!(restored.stats().requests, 0);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::ConcurrentLruCache;
use bincode::config::{self as bincode_config, Config};
use bincode::error::DecodeError;
use bincode::{Decode, Encode};
use core::hash::{BuildHasher, Hash};
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Upper bound on pairs reserved up front while decoding, so a corrupt count
/// cannot trigger a huge allocation before the data runs out.
const MAX_PREALLOCATED_PAIRS: usize = 4096;

/// Bincode configuration for persisted snapshots.
///
/// Changing it is a format change: little-endian, fixed-width integers.
#[inline]
pub fn storage_config() -> impl Config {
    bincode_config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
}

/// Writes the cache's live entries to `writer`, most recently used first.
///
/// The entries are copied under the cache's lock, so the output is one consistent
/// point in time; encoding happens after the lock is released. Returns the number
/// of entries written.
///
/// # Errors
///
/// Returns [`CacheError::Encode`](crate::CacheError::Encode) if an entry fails to
/// encode or the writer fails.
pub fn save<K, V, S, W>(cache: &ConcurrentLruCache<K, V, S>, writer: &mut W) -> Result<usize>
where
    K: Hash + Eq + Clone + Encode,
    V: Clone + Encode,
    S: BuildHasher + Clone,
    W: Write,
{
    let entries = cache.entries_snapshot();
    let config = storage_config();

    bincode::encode_into_std_write(entries.len() as u64, writer, config)?;
    for (key, value) in &entries {
        bincode::encode_into_std_write(key, writer, config)?;
        bincode::encode_into_std_write(value, writer, config)?;
    }

    info!("saved {} cache entries", entries.len());
    Ok(entries.len())
}

/// Reads a snapshot written by [`save`] into a new cache built from `config`.
///
/// # Errors
///
/// - [`CacheError::InvalidArgument`](crate::CacheError::InvalidArgument) if `config`
///   does not validate.
/// - [`CacheError::Decode`](crate::CacheError::Decode) if the data is truncated or
///   malformed. No cache is produced in that case.
pub fn load<K, V, R>(reader: &mut R, config: LruCacheConfig) -> Result<ConcurrentLruCache<K, V>>
where
    K: Hash + Eq + Clone + Decode<()>,
    V: Decode<()>,
    R: Read,
{
    config.validate()?;
    let entries = decode_entries(reader)?;

    let cache = ConcurrentLruCache::init(config, None)?;
    let total = entries.len();
    let restored = cache.append_lru(entries);
    if restored < total {
        warn!(
            "restored {restored} of {total} cache entries, the rest exceeded capacity {} or repeated a key",
            config.capacity
        );
    } else {
        info!("restored {restored} cache entries");
    }
    Ok(cache)
}

fn decode_entries<K, V, R>(reader: &mut R) -> Result<Vec<(K, V)>>
where
    K: Decode<()>,
    V: Decode<()>,
    R: Read,
{
    let config = storage_config();
    let count: u64 = bincode::decode_from_std_read(reader, config)?;
    let count = usize::try_from(count).map_err(|_| DecodeError::OutsideUsizeRange(count))?;

    let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATED_PAIRS));
    for _ in 0..count {
        let key: K = bincode::decode_from_std_read(reader, config)?;
        let value: V = bincode::decode_from_std_read(reader, config)?;
        entries.push((key, value));
    }
    Ok(entries)
}

/// [`save`] to a file, creating or truncating it.
///
/// The file is written in place; there is no atomic rename or fsync.
pub fn save_to_path<K, V, S, P>(cache: &ConcurrentLruCache<K, V, S>, path: P) -> Result<usize>
where
    K: Hash + Eq + Clone + Encode,
    V: Clone + Encode,
    S: BuildHasher + Clone,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let written = save(cache, &mut writer)?;
    writer.flush()?;
    Ok(written)
}

/// [`load`] from a file.
pub fn load_from_path<K, V, P>(path: P, config: LruCacheConfig) -> Result<ConcurrentLruCache<K, V>>
where
    K: Hash + Eq + Clone + Decode<()>,
    V: Decode<()>,
    P: AsRef<Path>,
{
    let mut reader = BufReader::new(File::open(path)?);
    load(&mut reader, config)
}
