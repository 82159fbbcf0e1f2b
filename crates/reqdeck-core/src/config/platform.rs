//! Client platform configuration.

use serde::{Deserialize, Serialize};

/// Local client settings: where preferences live and which agent to use
/// when none has been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Path of the JSON preference file.
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,
    /// Agent used when no preference is stored: `"proxy"`, `"desktop"`,
    /// `"extension"` or `"web"`.
    #[serde(default = "default_agent")]
    pub default_agent: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            preferences_path: default_preferences_path(),
            default_agent: default_agent(),
        }
    }
}

fn default_preferences_path() -> String {
    "data/preferences.json".to_string()
}

fn default_agent() -> String {
    "proxy".to_string()
}
