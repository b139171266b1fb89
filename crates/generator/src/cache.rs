//! Content-addressed result cache.
//!
//! Each entry is one JSON file, `<key>.json`, under the configured
//! directory. The file holds the validated payload and the epoch-millisecond
//! time it was written. Expiry is checked lazily on read; stale files stay
//! on disk until the same key is written again.
//!
//! Writes go to a temporary file that is renamed into place, so readers never
//! see a torn entry. Concurrent writers of one key are not coordinated: the
//! last rename wins.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use sha2::{Digest, Sha256};

use crate::config::CacheConfig;
use crate::error::CacheError;

/// Logical generation request: generator name plus ordered parameters.
/// Only used to derive a cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    generator: String,
    parameters: Vec<JsonValue>,
}

impl GenerationRequest {
    pub fn new(generator: &str) -> Self {
        Self {
            generator: generator.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Append the next parameter
    pub fn param(mut self, value: impl Into<JsonValue>) -> Self {
        self.parameters.push(value.into());
        self
    }

    /// SHA-256 (hex) of the serialized `[generator, [parameters...]]` tuple
    pub fn cache_key(&self) -> String {
        let tuple = json!([self.generator, self.parameters]);
        let digest = Sha256::digest(tuple.to_string().as_bytes());
        hex::encode(digest)
    }
}

/// On-disk layout of one entry
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    key: String,
    stored_at_epoch_ms: i64,
    payload: JsonValue,
}

/// Persistent key/value store with a global TTL
#[derive(Debug, Clone)]
pub struct CacheStore {
    config: CacheConfig,
}

impl CacheStore {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// A store that never hits and never writes
    pub fn disabled() -> Self {
        Self::new(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.config.directory.join(format!("{key}.json"))
    }

    /// Look up `key` against the wall clock
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, now_ms()).await
    }

    /// Look up `key` as of `now_ms`. Disabled stores, missing, expired,
    /// unreadable and undecodable entries are all misses.
    pub async fn get_at<T: DeserializeOwned>(&self, key: &str, now_ms: i64) -> Option<T> {
        if !self.config.enabled || !is_valid_key(key) {
            return None;
        }

        let path = self.entry_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(cache_key = key, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(cache_key = key, error = %e, "Ignoring corrupt cache entry");
                return None;
            }
        };

        let age_ms = now_ms.saturating_sub(entry.stored_at_epoch_ms);
        if age_ms > self.ttl_ms() {
            tracing::debug!(cache_key = key, age_ms = age_ms, "Cache entry expired");
            return None;
        }

        match serde_json::from_value(entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(cache_key = key, error = %e, "Cache payload does not match document type");
                None
            }
        }
    }

    /// Store `value` under `key`, stamped with the wall clock
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.set_at(key, value, now_ms()).await
    }

    /// Store `value` under `key`, stamped with `stored_at_ms`. Replaces any
    /// existing entry for the key.
    pub async fn set_at<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        stored_at_ms: i64,
    ) -> Result<(), CacheError> {
        if !self.config.enabled {
            return Ok(());
        }
        if !is_valid_key(key) {
            return Err(CacheError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid cache key {key:?}"),
            )));
        }

        let entry = CacheEntry {
            key: key.to_string(),
            stored_at_epoch_ms: stored_at_ms,
            payload: serde_json::to_value(value)?,
        };
        let bytes = serde_json::to_vec_pretty(&entry)?;

        tokio::fs::create_dir_all(&self.config.directory).await?;
        let tmp_path = self
            .config
            .directory
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp_path, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, self.entry_path(key)).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(cache_key = key, "Cache entry stored");
        Ok(())
    }

    /// Remove every entry file. Returns how many were removed.
    pub async fn clear(&self) -> Result<usize, CacheError> {
        let mut dir = match tokio::fs::read_dir(&self.config.directory).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.config.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Keys become file names, so only plain identifier characters are allowed
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TTL_MS: i64 = 60_000;

    fn store(dir: &tempfile::TempDir) -> CacheStore {
        CacheStore::new(CacheConfig {
            enabled: true,
            directory: dir.path().to_path_buf(),
            ttl: Duration::from_millis(TTL_MS as u64),
        })
    }

    #[test]
    fn key_is_deterministic() {
        let a = GenerationRequest::new("insurance").param("MRN-1").param(true);
        let b = GenerationRequest::new("insurance").param("MRN-1").param(true);
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key().len(), 64);
    }

    #[test]
    fn key_changes_with_any_parameter() {
        let base = GenerationRequest::new("insurance").param("MRN-1").param(true);
        let other_value = GenerationRequest::new("insurance").param("MRN-1").param(false);
        let other_name = GenerationRequest::new("claim").param("MRN-1").param(true);
        let reordered = GenerationRequest::new("insurance").param(true).param("MRN-1");
        assert_ne!(base.cache_key(), other_value.cache_key());
        assert_ne!(base.cache_key(), other_name.cache_key());
        assert_ne!(base.cache_key(), reordered.cache_key());
    }

    #[test]
    fn key_distinguishes_parameter_boundaries() {
        let joined = GenerationRequest::new("lab_report").param("ab").param("c");
        let split = GenerationRequest::new("lab_report").param("a").param("bc");
        assert_ne!(joined.cache_key(), split.cache_key());
    }

    #[tokio::test]
    async fn set_then_get_returns_payload() {
        let dir = tempfile::tempdir().unwrap();
        let cache = store(&dir);
        let value = json!({ "name": "Maria" });

        cache.set("abc123", &value).await.unwrap();
        let hit: Option<JsonValue> = cache.get("abc123").await;
        assert_eq!(hit, Some(value));
        assert!(dir.path().join("abc123.json").is_file());
    }

    #[tokio::test]
    async fn missing_key_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let hit: Option<JsonValue> = store(&dir).get("nothing").await;
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = store(&dir);
        let written_at = 1_700_000_000_000;
        cache.set_at("k1", &json!({ "v": 1 }), written_at).await.unwrap();

        let before: Option<JsonValue> = cache.get_at("k1", written_at + TTL_MS - 1).await;
        assert!(before.is_some());
        let at_limit: Option<JsonValue> = cache.get_at("k1", written_at + TTL_MS).await;
        assert!(at_limit.is_some());
        let after: Option<JsonValue> = cache.get_at("k1", written_at + TTL_MS + 1).await;
        assert!(after.is_none());

        // expired entries stay on disk until overwritten
        assert!(dir.path().join("k1.json").is_file());
        cache
            .set_at("k1", &json!({ "v": 2 }), written_at + TTL_MS + 1)
            .await
            .unwrap();
        let fresh: Option<JsonValue> = cache.get_at("k1", written_at + TTL_MS + 2).await;
        assert_eq!(fresh, Some(json!({ "v": 2 })));
    }

    #[tokio::test]
    async fn disabled_store_never_hits_or_writes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(CacheConfig {
            enabled: false,
            directory: dir.path().to_path_buf(),
            ttl: Duration::from_millis(TTL_MS as u64),
        });

        cache.set("k", &json!({ "v": 1 })).await.unwrap();
        assert!(!dir.path().join("k.json").exists());

        // an entry written by an enabled store is still ignored
        store(&dir).set("k", &json!({ "v": 1 })).await.unwrap();
        let hit: Option<JsonValue> = cache.get("k").await;
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), b"{ not json").unwrap();
        let hit: Option<JsonValue> = store(&dir).get("bad").await;
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn payload_of_wrong_shape_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = store(&dir);
        cache.set("k", &json!("just a string")).await.unwrap();
        let hit: Option<Vec<u32>> = cache.get("k").await;
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn rejects_keys_that_are_not_file_safe() {
        let dir = tempfile::tempdir().unwrap();
        let cache = store(&dir);
        assert!(cache.set("../escape", &json!({})).await.is_err());
        let hit: Option<JsonValue> = cache.get("../escape").await;
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn clear_removes_entries_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = store(&dir);
        cache.set("a", &json!(1)).await.unwrap();
        cache.set("b", &json!(2)).await.unwrap();

        assert_eq!(cache.clear().await.unwrap(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
