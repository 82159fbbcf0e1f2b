//! Bulk payload returned by the workspace artifacts endpoint.

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::environment::Environment;
use crate::folder::Folder;
use crate::request::Request;
use crate::workspace::Workspace;

/// Everything the explorer needs for one workspace, fetched in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerArtifacts {
    /// The workspace itself.
    pub workspace: Workspace,
    /// All collections.
    #[serde(default)]
    pub collections: Vec<Collection>,
    /// All folders, nested or not.
    #[serde(default)]
    pub folders: Vec<Folder>,
    /// All requests.
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Environments, handed to the environment store.
    #[serde(default)]
    pub environments: Vec<Environment>,
}

impl ExplorerArtifacts {
    /// An empty artifact set for `workspace`.
    pub fn empty(workspace: Workspace) -> Self {
        Self {
            workspace,
            collections: Vec::new(),
            folders: Vec::new(),
            requests: Vec::new(),
            environments: Vec::new(),
        }
    }
}
