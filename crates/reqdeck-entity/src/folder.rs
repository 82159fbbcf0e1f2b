//! Folder entity. Folders live in a collection and may nest.

use serde::{Deserialize, Serialize};
use validator::Validate;

use reqdeck_core::types::{CollectionId, FolderId};

/// A folder inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The collection this folder belongs to.
    pub collection_id: CollectionId,
    /// Parent folder; `None` when attached directly under the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

impl Folder {
    /// Whether the folder sits directly under its collection.
    pub fn is_root(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Data supplied by the caller to create a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolder {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning collection.
    pub collection_id: CollectionId,
    /// Parent folder, which must belong to the same collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

/// Partial update of a folder. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateFolder {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateFolder {
    /// Shallow-merge the present fields into `folder`.
    pub fn apply(&self, folder: &mut Folder) {
        if let Some(name) = &self.name {
            folder.name = name.clone();
        }
        if let Some(description) = &self.description {
            folder.description = Some(description.clone());
        }
    }
}
