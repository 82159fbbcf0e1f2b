//! Client execution context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use reqdeck_core::error::AppError;

/// Where outgoing requests are executed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// Through the hosted proxy.
    #[default]
    Proxy,
    /// Directly from a browser tab.
    Web,
    /// From the desktop application.
    Desktop,
    /// Through the browser extension.
    Extension,
}

impl Agent {
    /// All agents, in display order.
    pub const ALL: [Agent; 4] = [Agent::Proxy, Agent::Web, Agent::Desktop, Agent::Extension];

    /// Lowercase name, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proxy => "proxy",
            Self::Web => "web",
            Self::Desktop => "desktop",
            Self::Extension => "extension",
        }
    }

    /// Agent to use given the persisted choice and the configured default.
    ///
    /// A browser tab cannot send arbitrary requests itself, so `Web` always
    /// resolves to `Proxy`.
    pub fn resolve(stored: Option<Agent>, default: Agent) -> Agent {
        match stored.unwrap_or(default) {
            Self::Web => Self::Proxy,
            agent => agent,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Agent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|agent| agent.as_str() == wanted)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unknown agent '{s}', expected one of: proxy, web, desktop, extension"
                ))
            })
    }
}
