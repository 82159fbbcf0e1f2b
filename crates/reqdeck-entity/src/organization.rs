//! Organization entity and name availability answers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use reqdeck_core::types::OrganizationId;

/// An organization owning shared workspaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
}

/// Payload to create an organization along with its first workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateOrganization {
    /// Organization name.
    #[validate(length(min = 1, max = 255, message = "Organization name is required"))]
    pub name: String,
    /// Name of the workspace created with the organization.
    #[validate(length(min = 1, max = 255, message = "Workspace name is required"))]
    pub default_workspace_name: String,
}

/// Answer of a name availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAvailability {
    /// `true` when the name is not taken.
    pub available: bool,
}
