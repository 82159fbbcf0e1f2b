//! In-memory tree provider.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use reqdeck_core::types::{CollectionId, FolderId, RequestId};
use reqdeck_entity::{Collection, Folder, NodeKind, Request};

use crate::provider::TreeProvider;

/// A node in the explorer tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Entity identifier.
    pub id: Uuid,
    /// Entity kind.
    pub kind: NodeKind,
    /// Displayed title.
    pub title: String,
    /// Parent node; `None` for top-level nodes.
    pub parent: Option<Uuid>,
    /// HTTP method label, requests only.
    pub method: Option<String>,
}

impl TreeNode {
    /// Node for a collection.
    pub fn from_collection(collection: &Collection) -> Self {
        Self {
            id: collection.id.into_uuid(),
            kind: NodeKind::Collection,
            title: collection.name.clone(),
            parent: None,
            method: None,
        }
    }

    /// Node for a folder, under its parent folder or else its collection.
    pub fn from_folder(folder: &Folder) -> Self {
        let parent = folder
            .folder_id
            .map(FolderId::into_uuid)
            .unwrap_or_else(|| folder.collection_id.into_uuid());
        Self {
            id: folder.id.into_uuid(),
            kind: NodeKind::Folder,
            title: folder.name.clone(),
            parent: Some(parent),
            method: None,
        }
    }

    /// Node for a request, under its folder, its collection, or the root.
    pub fn from_request(request: &Request) -> Self {
        let parent = request
            .folder_id
            .map(FolderId::into_uuid)
            .or_else(|| request.collection_id.map(CollectionId::into_uuid));
        Self {
            id: request.id.into_uuid(),
            kind: NodeKind::Request,
            title: request.name.clone(),
            parent,
            method: Some(request.method.clone()),
        }
    }
}

/// A call received by [`MemoryTreeProvider`], kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeCall {
    /// `init` with the number of entities of each kind.
    Init {
        /// Collections passed.
        collections: usize,
        /// Folders passed.
        folders: usize,
        /// Requests passed.
        requests: usize,
    },
    /// `add_collection_item`.
    AddCollection(Collection),
    /// `add_folder_item`.
    AddFolder(Folder),
    /// `add_request_item`.
    AddRequest(Request),
    /// `update_collection_item`.
    UpdateCollection(Collection),
    /// `update_folder_item`.
    UpdateFolder(Folder),
    /// `update_request_item`.
    UpdateRequest(Request),
    /// `delete_collection_item`.
    DeleteCollection(CollectionId),
    /// `delete_folder_item`.
    DeleteFolder(FolderId),
    /// `delete_request_item`.
    DeleteRequest(RequestId),
}

/// Tree provider holding nodes in insertion order.
#[derive(Debug, Default)]
pub struct MemoryTreeProvider {
    nodes: RwLock<Vec<TreeNode>>,
    journal: Mutex<Vec<TreeCall>>,
}

impl MemoryTreeProvider {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers of every node.
    pub fn node_ids(&self) -> BTreeSet<Uuid> {
        self.read(|nodes| nodes.iter().map(|n| n.id).collect())
    }

    /// A node by identifier.
    pub fn get(&self, id: Uuid) -> Option<TreeNode> {
        self.read(|nodes| nodes.iter().find(|n| n.id == id).cloned())
    }

    /// Top-level nodes: collections and root requests.
    pub fn roots(&self) -> Vec<TreeNode> {
        self.read(|nodes| nodes.iter().filter(|n| n.parent.is_none()).cloned().collect())
    }

    /// Direct children of `id`, in insertion order.
    pub fn children_of(&self, id: Uuid) -> Vec<TreeNode> {
        self.read(|nodes| {
            nodes
                .iter()
                .filter(|n| n.parent == Some(id))
                .cloned()
                .collect()
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.read(Vec::len)
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<TreeCall> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget the recorded calls.
    pub fn clear_calls(&self) {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn read<R>(&self, f: impl FnOnce(&Vec<TreeNode>) -> R) -> R {
        f(&self.nodes.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Vec<TreeNode>) -> R) -> R {
        f(&mut self.nodes.write().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self, call: TreeCall) {
        trace!(?call, "tree provider call");
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn upsert(&self, node: TreeNode) {
        self.write(|nodes| match nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = node,
            None => nodes.push(node),
        });
    }

    fn refresh(&self, node: TreeNode) {
        self.write(|nodes| {
            if let Some(existing) = nodes.iter_mut().find(|n| n.id == node.id) {
                *existing = node;
            }
        });
    }

    fn remove_subtree(&self, root: Uuid) {
        self.write(|nodes| {
            let mut doomed = HashSet::from([root]);
            loop {
                let before = doomed.len();
                for node in nodes.iter() {
                    if node.parent.is_some_and(|p| doomed.contains(&p)) {
                        doomed.insert(node.id);
                    }
                }
                if doomed.len() == before {
                    break;
                }
            }
            nodes.retain(|n| !doomed.contains(&n.id));
        });
    }
}

impl TreeProvider for MemoryTreeProvider {
    fn init(&self, collections: &[Collection], folders: &[Folder], requests: &[Request]) {
        self.write(|nodes| {
            nodes.clear();
            nodes.extend(collections.iter().map(TreeNode::from_collection));
            nodes.extend(folders.iter().map(TreeNode::from_folder));
            nodes.extend(requests.iter().map(TreeNode::from_request));
        });
        self.record(TreeCall::Init {
            collections: collections.len(),
            folders: folders.len(),
            requests: requests.len(),
        });
    }

    fn add_collection_item(&self, collection: &Collection) {
        self.upsert(TreeNode::from_collection(collection));
        self.record(TreeCall::AddCollection(collection.clone()));
    }

    fn add_folder_item(&self, folder: &Folder) {
        self.upsert(TreeNode::from_folder(folder));
        self.record(TreeCall::AddFolder(folder.clone()));
    }

    fn add_request_item(&self, request: &Request) {
        self.upsert(TreeNode::from_request(request));
        self.record(TreeCall::AddRequest(request.clone()));
    }

    fn update_collection_item(&self, collection: &Collection) {
        self.refresh(TreeNode::from_collection(collection));
        self.record(TreeCall::UpdateCollection(collection.clone()));
    }

    fn update_folder_item(&self, folder: &Folder) {
        self.refresh(TreeNode::from_folder(folder));
        self.record(TreeCall::UpdateFolder(folder.clone()));
    }

    fn update_request_item(&self, request: &Request) {
        self.refresh(TreeNode::from_request(request));
        self.record(TreeCall::UpdateRequest(request.clone()));
    }

    fn delete_collection_item(&self, id: CollectionId) {
        self.remove_subtree(id.into_uuid());
        self.record(TreeCall::DeleteCollection(id));
    }

    fn delete_folder_item(&self, id: FolderId) {
        self.remove_subtree(id.into_uuid());
        self.record(TreeCall::DeleteFolder(id));
    }

    fn delete_request_item(&self, id: RequestId) {
        self.remove_subtree(id.into_uuid());
        self.record(TreeCall::DeleteRequest(id));
    }
}
