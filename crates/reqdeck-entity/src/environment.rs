//! Environment entity, loaded with the explorer and kept by the
//! environment store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use reqdeck_core::types::{EnvironmentId, WorkspaceId};

/// A named set of variables for a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique environment identifier.
    pub id: EnvironmentId,
    /// Display name.
    pub name: String,
    /// The workspace this environment belongs to.
    pub workspace_id: WorkspaceId,
    /// Variable values keyed by name.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}
