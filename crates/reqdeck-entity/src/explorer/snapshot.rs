//! The mutable explorer state for one workspace.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reqdeck_core::types::{CollectionId, FolderId, RequestId};

use crate::collection::Collection;
use crate::folder::Folder;
use crate::request::Request;

/// In-memory snapshot of the explorer's entity lists.
///
/// Removal helpers cascade: dropping a collection or folder also drops every
/// folder and request beneath it, mirroring how the tree view removes a
/// node together with its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerSnapshot {
    /// Collections of the workspace.
    pub collections: Vec<Collection>,
    /// Folders of the workspace.
    pub folders: Vec<Folder>,
    /// Requests of the workspace.
    pub requests: Vec<Request>,
    /// Busy indicator shown while a mutation is in flight.
    pub progressing: bool,
}

impl ExplorerSnapshot {
    /// Look up a collection.
    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Look up a collection for mutation.
    pub fn collection_mut(&mut self, id: CollectionId) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.id == id)
    }

    /// Look up a folder.
    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Look up a folder for mutation.
    pub fn folder_mut(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// Look up a request.
    pub fn request(&self, id: RequestId) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Look up a request for mutation.
    pub fn request_mut(&mut self, id: RequestId) -> Option<&mut Request> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    /// Replace all three lists, keeping the busy indicator as is.
    pub fn replace(
        &mut self,
        collections: Vec<Collection>,
        folders: Vec<Folder>,
        requests: Vec<Request>,
    ) {
        self.collections = collections;
        self.folders = folders;
        self.requests = requests;
    }

    /// Empty all three lists, keeping the busy indicator as is.
    pub fn clear(&mut self) {
        self.replace(Vec::new(), Vec::new(), Vec::new());
    }

    /// Whether no entity is loaded.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.folders.is_empty() && self.requests.is_empty()
    }

    /// Remove a collection with all its folders and requests.
    ///
    /// A request goes with the collection when it names the collection or
    /// sits in one of its folders, whatever its own `collection_id` says.
    /// Returns the number of entities removed.
    pub fn remove_collection(&mut self, id: CollectionId) -> usize {
        let folders: HashSet<FolderId> = self
            .folders
            .iter()
            .filter(|f| f.collection_id == id)
            .map(|f| f.id)
            .collect();
        let subtree: HashSet<FolderId> = folders
            .iter()
            .flat_map(|&folder_id| self.folder_subtree(folder_id))
            .collect();

        let before = self.len();
        self.collections.retain(|c| c.id != id);
        self.folders
            .retain(|f| f.collection_id != id && !subtree.contains(&f.id));
        self.requests.retain(|r| {
            r.collection_id != Some(id)
                && r.folder_id.is_none_or(|folder_id| !subtree.contains(&folder_id))
        });
        before - self.len()
    }

    /// Remove a folder with its nested folders and their requests.
    /// Returns the number of entities removed.
    pub fn remove_folder(&mut self, id: FolderId) -> usize {
        let subtree = self.folder_subtree(id);
        let before = self.len();
        self.folders.retain(|f| !subtree.contains(&f.id));
        self.requests
            .retain(|r| r.folder_id.is_none_or(|folder_id| !subtree.contains(&folder_id)));
        before - self.len()
    }

    /// Remove a single request. Returns the number of entities removed.
    pub fn remove_request(&mut self, id: RequestId) -> usize {
        let before = self.requests.len();
        self.requests.retain(|r| r.id != id);
        before - self.requests.len()
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.collections.len() + self.folders.len() + self.requests.len()
    }

    /// Every entity identifier, as the tree view would key its nodes.
    pub fn node_ids(&self) -> BTreeSet<Uuid> {
        self.collections
            .iter()
            .map(|c| c.id.into_uuid())
            .chain(self.folders.iter().map(|f| f.id.into_uuid()))
            .chain(self.requests.iter().map(|r| r.id.into_uuid()))
            .collect()
    }

    /// `id` plus every folder nested below it. Only `id` itself is returned
    /// when it is not a known folder, so removal still filters it out.
    fn folder_subtree(&self, id: FolderId) -> HashSet<FolderId> {
        let mut subtree = HashSet::from([id]);
        loop {
            let grown: Vec<FolderId> = self
                .folders
                .iter()
                .filter(|f| !subtree.contains(&f.id))
                .filter(|f| f.folder_id.is_some_and(|parent| subtree.contains(&parent)))
                .map(|f| f.id)
                .collect();
            if grown.is_empty() {
                return subtree;
            }
            subtree.extend(grown);
        }
    }
}
