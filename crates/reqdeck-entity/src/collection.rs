//! Collection entity: top-level grouping of folders and requests.

use serde::{Deserialize, Serialize};
use validator::Validate;

use reqdeck_core::types::{CollectionId, WorkspaceId};

/// A collection in a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection identifier.
    pub id: CollectionId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The workspace this collection belongs to.
    pub workspace_id: WorkspaceId,
}

/// Data supplied by the caller to create a collection. The identifier and
/// workspace are filled in by the explorer store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCollection {
    /// Collection name.
    #[validate(length(min = 1, max = 255, message = "Collection name is required"))]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update of a collection. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateCollection {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Collection name is required"))]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateCollection {
    /// Shallow-merge the present fields into `collection`.
    pub fn apply(&self, collection: &mut Collection) {
        if let Some(name) = &self.name {
            collection.name = name.clone();
        }
        if let Some(description) = &self.description {
            collection.description = Some(description.clone());
        }
    }
}
