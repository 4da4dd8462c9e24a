//! In-memory memoization of analysis results
//!
//! Results are keyed by a SHA-256 fingerprint of the document collection
//! plus the call parameters, and stored as JSON values so one cache can
//! hold every result type.
//!
//! # Example
//!
//! ```rust
//! use tweetlens::cache::AnalysisCache;
//! use tweetlens::analytics::rank_keywords;
//! use tweetlens::models::Document;
//!
//! let documents: Vec<Document> = Vec::new();
//! let mut cache = AnalysisCache::new();
//! let key = AnalysisCache::key("keywords", &AnalysisCache::fingerprint(&documents), &[20]);
//! let ranked = cache.get_or_compute(&key, || rank_keywords(&documents, 20))?;
//! assert!(ranked.is_empty());
//! # Ok::<(), tweetlens::error::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::models::Document;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Memo table for analysis results
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: HashMap<String, Value>,
    stats: CacheStats,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a document collection's timestamps and texts
    ///
    /// Absent text hashes differently from empty text.
    pub fn fingerprint<'a, I>(documents: I) -> String
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut hasher = Sha256::new();
        for document in documents {
            hasher.update(document.timestamp.timestamp_micros().to_le_bytes());
            match document.text() {
                Some(text) => {
                    hasher.update([1u8]);
                    hasher.update((text.len() as u64).to_le_bytes());
                    hasher.update(text.as_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
        format!("{:x}", hasher.finalize())
    }

    /// Build a cache key from a result kind, a fingerprint and parameters
    pub fn key(kind: &str, fingerprint: &str, params: &[usize]) -> String {
        let params: Vec<String> = params.iter().map(usize::to_string).collect();
        format!("{kind}:{fingerprint}:{}", params.join(","))
    }

    /// Get a cached value, deserialized
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.hits += 1;
                tracing::debug!(key = %key, "Cache hit");
                Ok(Some(serde_json::from_value(value.clone())?))
            }
            None => {
                self.stats.misses += 1;
                tracing::debug!(key = %key, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Store a value
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    pub fn get_or_compute<T, E, F>(&mut self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        E: Into<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if let Some(cached) = self.get(key)? {
            return Ok(cached);
        }
        let value = compute().map_err(Into::into)?;
        self.set(key, &value)?;
        Ok(value)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
