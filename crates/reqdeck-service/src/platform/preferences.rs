//! Preference storage backends.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use reqdeck_core::error::{AppError, ErrorKind};
use reqdeck_core::result::AppResult;
use reqdeck_core::traits::preferences::PreferenceStore;

type PreferenceMap = BTreeMap<String, String>;

fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::validation("Preference key must not be empty"));
    }
    Ok(())
}

/// Preferences kept in a single JSON object file, one entry per key.
///
/// Writes go to a sibling temporary file that is then renamed into place.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Store backed by `path`. The file and its parent directories are
    /// created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> AppResult<PreferenceMap> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PreferenceMap::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read {}", self.path.display()),
                    e,
                ));
            }
        };
        if raw.trim().is_empty() {
            return Ok(PreferenceMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to parse preferences {}", self.path.display()),
                e,
            )
        })
    }

    async fn write_map(&self, map: &PreferenceMap) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let serialized = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serialized).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        validate_key(key)?;
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn save(&self, key: &str, raw_json: &str) -> AppResult<()> {
        validate_key(key)?;
        serde_json::from_str::<serde_json::Value>(raw_json)?;

        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), raw_json.to_string());
        self.write_map(&map).await?;
        debug!(key, path = %self.path.display(), "Preference saved");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        validate_key(key)?;
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

/// Preferences held in process memory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: DashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn save(&self, key: &str, raw_json: &str) -> AppResult<()> {
        validate_key(key)?;
        serde_json::from_str::<serde_json::Value>(raw_json)?;
        self.entries.insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
