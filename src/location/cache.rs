//! In-memory location cache.
//!
//! Keys are trimmed and lower-cased. An empty candidate list is a real
//! answer ("no such place") and is cached like any other. By default the
//! cache is unbounded and never expires; `CacheConfig` can cap the entry
//! count (oldest insertion evicted first) or add a TTL. Expired entries are
//! dropped on the next `put`. A capacity of zero stores nothing.
//!
//! `put` is last-write-wins. A `get` followed by a fetch and a `put` is not
//! atomic: when the cache is shared behind a lock, hold the lock across the
//! fetch if at most one fetch per key is required.

use super::types::LocationCandidate;
use crate::config::CacheConfig;
use std::collections::HashMap;

struct CacheEntry {
    candidates: Vec<LocationCandidate>,
    timestamp: i64,
    seq: u64,
}

/// The location cache.
pub struct LocationCache {
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
    next_seq: u64,
}

/// Normalize a query into a cache key.
pub fn normalize_key(query: &str) -> String {
    query.trim().to_lowercase()
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationCache {
    /// Unbounded cache with no expiry.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            next_seq: 0,
        }
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        match self.config.ttl {
            Some(ttl) => {
                let now = chrono::Utc::now().timestamp_millis();
                now - entry.timestamp > ttl.as_millis() as i64
            }
            None => false,
        }
    }

    fn purge_expired(&mut self) {
        let Some(ttl) = self.config.ttl else {
            return;
        };
        let cutoff = chrono::Utc::now().timestamp_millis() - ttl.as_millis() as i64;
        self.entries.retain(|_, e| e.timestamp >= cutoff);
    }

    /// Look up a query. `None` means "not cached"; `Some(&[])` means the
    /// place is known not to exist.
    pub fn get(&self, query: &str) -> Option<&[LocationCandidate]> {
        let entry = self.entries.get(&normalize_key(query))?;
        if self.is_expired(entry) {
            return None;
        }
        Some(&entry.candidates)
    }

    /// Store the candidates for a query, replacing any previous entry.
    pub fn put(&mut self, query: &str, candidates: Vec<LocationCandidate>) {
        let key = normalize_key(query);
        self.purge_expired();

        if let Some(cap) = self.config.capacity {
            if cap == 0 {
                return;
            }
            if !self.entries.contains_key(&key) && self.entries.len() >= cap {
                self.evict_oldest();
            }
        }

        let entry = CacheEntry {
            candidates,
            timestamp: chrono::Utc::now().timestamp_millis(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(key, entry);
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.seq)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }

    /// Number of stored entries. Entries that expired since the last `put`
    /// are still counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn paris() -> LocationCandidate {
        LocationCandidate {
            name: "Paris".into(),
            state: Some("Ile-de-France".into()),
            country: "FR".into(),
            lat: 48.8589,
            lon: 2.3200,
        }
    }

    #[test]
    fn test_cache_put_get() {
        let mut cache = LocationCache::new();
        cache.put("Paris", vec![paris()]);

        let result = cache.get("paris").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].country, "FR");
    }

    #[test]
    fn test_empty_result_is_a_hit() {
        let mut cache = LocationCache::new();
        cache.put("Paris", vec![]);

        let empty: &[LocationCandidate] = &[];
        assert_eq!(cache.get(" paris "), Some(empty));
    }

    #[test]
    fn test_cache_case_insensitive() {
        let mut cache = LocationCache::new();
        cache.put("  New York ", vec![]);
        assert!(cache.get("NEW YORK").is_some());
        assert!(cache.get("new york").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let cache = LocationCache::new();
        assert!(cache.get("nonexistent").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_whitespace_query_is_valid_key() {
        let mut cache = LocationCache::new();
        cache.put("   ", vec![]);
        assert!(cache.get("").is_some());
    }

    #[test]
    fn test_put_last_write_wins() {
        let mut cache = LocationCache::new();
        cache.put("paris", vec![]);
        cache.put("PARIS", vec![paris()]);
        assert_eq!(cache.get("paris").unwrap().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest_insertion() {
        let mut cache = LocationCache::with_config(CacheConfig {
            capacity: Some(2),
            ttl: None,
        });
        cache.put("a", vec![]);
        cache.put("b", vec![]);
        cache.put("c", vec![]);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_capacity_overwrite_does_not_evict() {
        let mut cache = LocationCache::with_config(CacheConfig {
            capacity: Some(2),
            ttl: None,
        });
        cache.put("a", vec![]);
        cache.put("b", vec![]);
        cache.put("a", vec![paris()]);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_ttl_expiry() {
        let mut cache = LocationCache::with_config(CacheConfig {
            capacity: None,
            ttl: Some(Duration::from_millis(20)),
        });
        cache.put("paris", vec![paris()]);
        assert!(cache.get("paris").is_some());

        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get("paris").is_none());
    }

    #[test]
    fn test_expired_entries_dropped_on_put() {
        let mut cache = LocationCache::with_config(CacheConfig {
            capacity: None,
            ttl: Some(Duration::from_millis(20)),
        });
        cache.put("paris", vec![paris()]);
        cache.put("oslo", vec![]);
        assert_eq!(cache.len(), 2);

        std::thread::sleep(Duration::from_millis(60));
        cache.put("rome", vec![]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("rome").is_some());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = LocationCache::with_config(CacheConfig {
            capacity: Some(0),
            ttl: None,
        });
        cache.put("paris", vec![paris()]);
        assert!(cache.is_empty());
        assert!(cache.get("paris").is_none());
    }
}
