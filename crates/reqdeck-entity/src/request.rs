//! Request entity: the leaves of the explorer tree.

use serde::{Deserialize, Serialize};
use validator::Validate;

use reqdeck_core::types::{CollectionId, FolderId, RequestId, WorkspaceId};

/// A saved API request.
///
/// A request sits at the workspace root, directly in a collection, or in a
/// folder. When `folder_id` is set, `collection_id` is the folder's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unique request identifier.
    pub id: RequestId,
    /// Display name.
    pub name: String,
    /// HTTP method label, e.g. `GET`.
    pub method: String,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The workspace this request belongs to.
    pub workspace_id: WorkspaceId,
    /// Owning collection, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<CollectionId>,
    /// Owning folder, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

impl Request {
    /// Whether the request sits at the workspace root.
    pub fn is_workspace_root(&self) -> bool {
        self.collection_id.is_none() && self.folder_id.is_none()
    }
}

/// Data supplied by the caller to create a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateRequest {
    /// Request name.
    #[validate(length(min = 1, max = 255, message = "Request name is required"))]
    pub name: String,
    /// HTTP method label.
    #[validate(length(min = 1, max = 16, message = "Request method is required"))]
    pub method: String,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<CollectionId>,
    /// Owning folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

/// Partial update of a request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Request name is required"))]
    pub name: Option<String>,
    /// New HTTP method label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 16, message = "Request method is required"))]
    pub method: Option<String>,
    /// New URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateRequest {
    /// Shallow-merge the present fields into `request`. The method is
    /// stored uppercased.
    pub fn apply(&self, request: &mut Request) {
        if let Some(name) = &self.name {
            request.name = name.clone();
        }
        if let Some(method) = &self.method {
            request.method = method.to_uppercase();
        }
        if let Some(url) = &self.url {
            request.url = url.clone();
        }
        if let Some(description) = &self.description {
            request.description = Some(description.clone());
        }
    }
}
