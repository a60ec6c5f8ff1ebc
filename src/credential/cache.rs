//! Time-boxed on-disk cache of a resolved API key (hook mode).

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::credential::ApiKey;
use crate::error::CacheError;

/// Persisted cache record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub api_key: String,
    pub expiry: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

/// JSON file holding one API key and its expiry.
#[derive(Debug, Clone)]
pub struct KeyCache {
    path: PathBuf,
    ttl: Duration,
}

impl KeyCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// The cached key, if present and unexpired.
    ///
    /// Missing, unreadable or malformed records are all cache misses.
    pub fn get(&self) -> Option<ApiKey> {
        self.get_at(Utc::now())
    }

    fn get_at(&self, now: DateTime<Utc>) -> Option<ApiKey> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("Key cache {} not readable: {}", self.path.display(), e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Key cache {} is malformed: {}", self.path.display(), e);
                return None;
            }
        };

        if entry.is_expired_at(now) {
            debug!("Key cache expired at {}", entry.expiry);
            return None;
        }

        ApiKey::from_raw(&entry.api_key)
    }

    /// Overwrite the cache with `key`, expiring one TTL from now.
    pub fn put(&self, key: &ApiKey) -> Result<(), CacheError> {
        self.put_at(key, Utc::now())
    }

    fn put_at(&self, key: &ApiKey, now: DateTime<Utc>) -> Result<(), CacheError> {
        let entry = CacheEntry {
            api_key: key.expose().to_string(),
            expiry: now + self.ttl,
        };
        let json = serde_json::to_string(&entry).map_err(CacheError::Serialize)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| CacheError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(CacheError::Write)?;
        tmp.write_all(json.as_bytes()).map_err(CacheError::Write)?;
        tmp.persist(&self.path)
            .map_err(|e| CacheError::Write(e.error))?;

        debug!("Key cache written, expires at {}", entry.expiry);
        Ok(())
    }
}
