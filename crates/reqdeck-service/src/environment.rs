//! Environment store, filled by the explorer's bulk fetch.

use tokio::sync::watch;
use tracing::debug;

use reqdeck_core::types::EnvironmentId;
use reqdeck_entity::Environment;

/// Holds the environments of the active workspace.
#[derive(Debug)]
pub struct EnvironmentStore {
    environments: watch::Sender<Vec<Environment>>,
}

impl Default for EnvironmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (environments, _) = watch::channel(Vec::new());
        Self { environments }
    }

    /// Replace all environments.
    pub fn initialize(&self, environments: Vec<Environment>) {
        debug!(count = environments.len(), "Environments initialized");
        self.environments.send_replace(environments);
    }

    /// All environments.
    pub fn environments(&self) -> Vec<Environment> {
        self.environments.borrow().clone()
    }

    /// One environment by identifier.
    pub fn environment(&self, id: EnvironmentId) -> Option<Environment> {
        self.environments.borrow().iter().find(|e| e.id == id).cloned()
    }

    /// Watch for changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Environment>> {
        self.environments.subscribe()
    }

    /// Drop all environments.
    pub fn dispose(&self) {
        self.environments.send_replace(Vec::new());
    }
}
