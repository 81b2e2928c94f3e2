//! Content-addressed load cache
//!
//! Parsed record sets are keyed by source name (a path or an upload name)
//! and remembered together with the SHA-256 digest of the bytes they were
//! parsed from. A lookup whose content digest no longer matches drops the
//! stale entry and parses again.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::EmpenhoResult;
use crate::models::CommitmentRecord;

/// Identity of a loaded source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceKey {
    /// Path or upload name
    pub name: String,
    /// Hex SHA-256 of the source bytes
    pub digest: String,
}

impl SourceKey {
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            digest: content_digest(bytes),
        }
    }
}

/// Hex-encoded SHA-256 of a byte slice
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Debug)]
struct CacheEntry {
    digest: String,
    records: Arc<[CommitmentRecord]>,
}

/// Map from source name to the records parsed from its current content
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<String, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached records for `key`, or parse them with `parse` and store
    ///
    /// An entry stored under the same name with a different digest is
    /// replaced.
    pub fn get_or_load<F>(
        &mut self,
        key: &SourceKey,
        parse: F,
    ) -> EmpenhoResult<Arc<[CommitmentRecord]>>
    where
        F: FnOnce() -> EmpenhoResult<Vec<CommitmentRecord>>,
    {
        if let Some(entry) = self.entries.get(&key.name) {
            if entry.digest == key.digest {
                self.hits += 1;
                debug!(source = %key.name, "load cache hit");
                return Ok(Arc::clone(&entry.records));
            }
            debug!(source = %key.name, "source content changed, invalidating");
        }

        self.misses += 1;
        let records: Arc<[CommitmentRecord]> = parse()?.into();
        self.entries.insert(
            key.name.clone(),
            CacheEntry {
                digest: key.digest.clone(),
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    /// Records cached under `name`, regardless of current content
    pub fn get(&self, name: &str) -> Option<Arc<[CommitmentRecord]>> {
        self.entries.get(name).map(|e| Arc::clone(&e.records))
    }

    /// Whether `key` is cached with a matching digest
    pub fn contains(&self, key: &SourceKey) -> bool {
        self.entries
            .get(&key.name)
            .is_some_and(|e| e.digest == key.digest)
    }

    /// Drop the entry for `name`; returns whether one existed
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmpenhoError;

    fn records(n: usize) -> Vec<CommitmentRecord> {
        (0..n)
            .map(|i| CommitmentRecord::new(format!("NE{i}"), None, "Cat", "Fav", "Org", None))
            .collect()
    }

    #[test]
    fn test_digest_is_stable_hex() {
        let d = content_digest(b"abc");
        assert_eq!(
            d,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(content_digest(b"abc"), d);
    }

    #[test]
    fn test_hit_returns_same_records() {
        let mut cache = LoadCache::new();
        let key = SourceKey::new("data.csv", b"v1");

        let first = cache.get_or_load(&key, || Ok(records(2))).unwrap();
        let second = cache
            .get_or_load(&key, || panic!("should not parse again"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), (1, 1));
        assert!(cache.contains(&key));
    }

    #[test]
    fn test_changed_content_invalidates() {
        let mut cache = LoadCache::new();
        let v1 = SourceKey::new("data.csv", b"v1");
        let v2 = SourceKey::new("data.csv", b"v2");

        cache.get_or_load(&v1, || Ok(records(1))).unwrap();
        let reloaded = cache.get_or_load(&v2, || Ok(records(3))).unwrap();

        assert_eq!(reloaded.len(), 3);
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains(&v1));
        assert!(cache.contains(&v2));
    }

    #[test]
    fn test_failed_parse_is_not_cached() {
        let mut cache = LoadCache::new();
        let key = SourceKey::new("bad.csv", b"x");

        let result = cache.get_or_load(&key, || Err(EmpenhoError::missing_columns(["Órgão"])));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = LoadCache::new();
        cache
            .get_or_load(&SourceKey::new("a", b"1"), || Ok(records(1)))
            .unwrap();
        cache
            .get_or_load(&SourceKey::new("b", b"2"), || Ok(records(1)))
            .unwrap();

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
