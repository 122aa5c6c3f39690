use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process cache for per-viewer candidate pools and connection lists
///
/// Replaces the per-screen component state the UI used to hold fetched
/// profiles in: one shared snapshot with a TTL, re-fetched whole on
/// expiry. The matching pipeline itself stays pure; this only caches the
/// backend fetch.
pub struct CandidateCache {
    entries: moka::future::Cache<String, Vec<u8>>,
}

impl CandidateCache {
    /// Create a new cache with the given capacity and entry TTL
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    /// Get a value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.entries.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in the cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_string(), bytes).await;
        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop a single entry
    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Candidate pool snapshot for a viewer
    ///
    /// The fingerprint covers the criteria pushed into the backend query
    /// (role, gender, distance cap), so pools fetched under different
    /// query shapes never alias.
    pub fn candidates(user_id: &str, fingerprint: &str) -> String {
        format!("candidates:{}:{}", user_id, fingerprint)
    }
}
