//! Persisted query cache.
//!
//! Maps the exact query issued to the Semantic Scholar API to the raw JSON
//! payload it returned, so repeat runs never re-issue a lookup that already
//! succeeded. The store is an append-only journal across runs: entries are
//! never invalidated automatically, and deleting the file is the only
//! eviction path. Staleness over long gaps between runs is an accepted,
//! documented limitation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CacheError;

/// Persistent key-to-response store backing the author resolver.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    // BTreeMap keeps the serialized file deterministic across runs.
    entries: BTreeMap<String, Value>,
}

impl CacheStore {
    /// Hydrate the store from `path`.
    ///
    /// A missing file yields an empty store. A file that exists but cannot be
    /// parsed is fatal: silently discarding cached work risks masking stale
    /// or wrong results.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no cache file, starting empty");
            return Ok(Self { path, entries: BTreeMap::new() });
        }

        let raw = fs::read_to_string(&path)
            .map_err(|source| CacheError::Io { path: path.clone(), source })?;
        let entries = serde_json::from_str(&raw)
            .map_err(|source| CacheError::Corrupt { path: path.clone(), source })?;

        let store = Self { path, entries };
        tracing::debug!(entries = store.len(), "loaded query cache");
        Ok(store)
    }

    /// Look up the stored payload for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Store `value` under `key` and persist immediately, so an interrupted
    /// run keeps every lookup completed before the interruption.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> Result<(), CacheError> {
        self.entries.insert(key.into(), value);
        self.flush()
    }

    /// Write the current contents to disk.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write never leaves a partial cache behind.
    pub fn flush(&self) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let serialized = serde_json::to_string(&self.entries)
            .map_err(|source| CacheError::Corrupt { path: self.path.clone(), source })?;

        let tmp = self.tmp_path();
        fs::write(&tmp, serialized).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }

    /// Number of cached queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path the store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("cache"),
            std::ffi::OsStr::to_os_string,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
