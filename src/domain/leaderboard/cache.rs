use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Computed data plus when it was computed and a checksum of its serialized form
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub data: T,
    pub computed_at: DateTime<Utc>,
    pub checksum: String,
}

impl<T: Serialize> CacheEntry<T> {
    pub fn new(data: T, computed_at: DateTime<Utc>) -> Self {
        let checksum = checksum_of(&data);
        Self {
            data,
            computed_at,
            checksum,
        }
    }
}

/// Hex SHA-256 of the JSON serialization of `data`
pub fn checksum_of<T: Serialize>(data: &T) -> String {
    let bytes = serde_json::to_vec(data).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

/// A missing entry is always stale. An entry computed in the future (clock skew) is not.
pub fn is_stale<T>(
    entry: Option<&CacheEntry<T>>,
    now: DateTime<Utc>,
    min_interval: Duration,
) -> bool {
    match entry {
        None => true,
        Some(entry) => now
            .signed_duration_since(entry.computed_at)
            .to_std()
            .map(|age| age >= min_interval)
            .unwrap_or(false),
    }
}
