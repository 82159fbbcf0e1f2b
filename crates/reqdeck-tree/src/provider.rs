//! Tree provider trait.

use reqdeck_core::types::{CollectionId, FolderId, RequestId};
use reqdeck_entity::{Collection, Folder, Request};

/// Stateful structure backing the rendered explorer tree.
///
/// Calls are synchronous and made while the explorer store commits a
/// mutation, so implementations must not call back into the store.
pub trait TreeProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Replace the entire visible node set.
    fn init(&self, collections: &[Collection], folders: &[Folder], requests: &[Request]);

    /// Insert a collection node at the top level.
    fn add_collection_item(&self, collection: &Collection);

    /// Insert a folder node under its parent folder or collection.
    fn add_folder_item(&self, folder: &Folder);

    /// Insert a request node under its folder, collection, or the root.
    fn add_request_item(&self, request: &Request);

    /// Refresh a collection node after its entity changed.
    fn update_collection_item(&self, collection: &Collection);

    /// Refresh a folder node after its entity changed.
    fn update_folder_item(&self, folder: &Folder);

    /// Refresh a request node after its entity changed.
    fn update_request_item(&self, request: &Request);

    /// Remove a collection node and its descendants.
    fn delete_collection_item(&self, id: CollectionId);

    /// Remove a folder node and its descendants.
    fn delete_folder_item(&self, id: FolderId);

    /// Remove a request node.
    fn delete_request_item(&self, id: RequestId);
}
