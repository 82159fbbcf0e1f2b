//! Platform store: the active agent and its persisted preference.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use reqdeck_core::result::AppResult;
use reqdeck_core::traits::preferences::PreferenceStore;

use super::agent::Agent;

/// Preference key the agent is persisted under.
pub const AGENT_PREFERENCE_KEY: &str = "agent";

/// Holds the active agent. The preference is read once in
/// [`load`](Self::load) and written only by [`change_agent`](Self::change_agent).
#[derive(Debug)]
pub struct PlatformStore {
    preferences: Arc<dyn PreferenceStore>,
    initial: Agent,
    agent: watch::Sender<Agent>,
}

impl PlatformStore {
    /// Read the persisted agent and resolve it against `default_agent`.
    ///
    /// An unreadable stored value is ignored with a warning; a storage
    /// failure is returned.
    pub async fn load(
        preferences: Arc<dyn PreferenceStore>,
        default_agent: Agent,
    ) -> AppResult<Self> {
        let stored = match preferences.load(AGENT_PREFERENCE_KEY).await? {
            Some(raw) => match serde_json::from_str::<Agent>(&raw) {
                Ok(agent) => Some(agent),
                Err(e) => {
                    warn!(raw = %raw, error = %e, "Ignoring unreadable agent preference");
                    None
                }
            },
            None => None,
        };

        let initial = Agent::resolve(stored, default_agent);
        info!(agent = %initial, stored = ?stored, "Platform agent resolved");

        let (agent, _) = watch::channel(initial);
        Ok(Self {
            preferences,
            initial,
            agent,
        })
    }

    /// The active agent.
    pub fn agent(&self) -> Agent {
        *self.agent.borrow()
    }

    /// Watch the active agent.
    pub fn subscribe(&self) -> watch::Receiver<Agent> {
        self.agent.subscribe()
    }

    /// Persist `agent` and make it active. Nothing changes if persisting fails.
    pub async fn change_agent(&self, agent: Agent) -> AppResult<()> {
        let raw = serde_json::to_string(&agent)?;
        self.preferences.save(AGENT_PREFERENCE_KEY, &raw).await?;
        self.agent.send_replace(agent);
        info!(agent = %agent, "Platform agent changed");
        Ok(())
    }

    /// Return to the agent resolved at load time. The preference is kept.
    pub fn dispose(&self) {
        self.agent.send_replace(self.initial);
    }
}
