//! Workspace entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use reqdeck_core::types::{OrganizationId, WorkspaceId};

/// Name given to the local workspace before any remote workspace is loaded.
pub const GUEST_WORKSPACE_NAME: &str = "My Workspace";

/// Root scope for all explorer entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique workspace identifier.
    pub id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning organization; `None` for a personal workspace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
}

impl Workspace {
    /// A fresh local workspace with a client-generated identifier.
    pub fn guest() -> Self {
        Self {
            id: WorkspaceId::new(),
            name: GUEST_WORKSPACE_NAME.to_string(),
            description: None,
            organization_id: None,
        }
    }

    /// Whether the workspace belongs to an organization.
    pub fn is_organizational(&self) -> bool {
        self.organization_id.is_some()
    }
}

/// Payload to create a workspace. With `organization_id` it is created
/// inside that organization, otherwise it is personal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateWorkspace {
    /// Workspace name.
    #[validate(length(min = 1, max = 255, message = "Workspace name is required"))]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
}
