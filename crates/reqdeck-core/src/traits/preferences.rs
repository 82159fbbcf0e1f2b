//! Durable client-side key/value storage for preferences.

use async_trait::async_trait;

use crate::result::AppResult;

/// Preference storage. Values are raw JSON text stored per key.
#[async_trait]
pub trait PreferenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load the raw JSON stored under `key`, if any.
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Store raw JSON under `key`, replacing any previous value.
    async fn save(&self, key: &str, raw_json: &str) -> AppResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
