//! Explorer state store.
//!
//! Every mutation follows the same order: validate locally, call the
//! gateway, and only after the gateway resolves successfully commit the
//! change to the snapshot and the registered tree provider in one step.
//! A failed call leaves local state untouched, alerts the user with the
//! surfaced message and returns the error.

use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};
use validator::Validate;

use reqdeck_core::error::AppError;
use reqdeck_core::result::AppResult;
use reqdeck_core::traits::notifier::{Labels, Notifier};
use reqdeck_core::types::{CollectionId, FolderId, GatewayResponse, RequestId, WorkspaceId};
use reqdeck_entity::{
    Collection, CreateCollection, CreateFolder, CreateRequest, ExplorerArtifacts,
    ExplorerSnapshot, Folder, Request, UpdateCollection, UpdateFolder, UpdateRequest, Workspace,
};
use reqdeck_gateway::RemoteGateway;
use reqdeck_tree::TreeProvider;

use super::progress::{ProgressGuard, sync_flag};
use crate::environment::EnvironmentStore;

/// Single source of truth for the explorer of the active workspace.
///
/// Shared through `Arc`; readers use [`snapshot`](Self::snapshot),
/// [`select`](Self::select) or [`subscribe`](Self::subscribe). Concurrent
/// mutations are not serialized against each other: each commit is an
/// atomic read-modify-write of the snapshot, and the last one wins.
#[derive(Debug)]
pub struct ExplorerStore {
    /// Remote sync gateway.
    gateway: Arc<dyn RemoteGateway>,
    /// User notifications.
    notifier: Arc<dyn Notifier>,
    /// Receives environments from the bulk fetch.
    environments: Arc<EnvironmentStore>,
    /// Active workspace.
    workspace: watch::Sender<Workspace>,
    /// Collections, folders, requests and the busy flag.
    snapshot: watch::Sender<ExplorerSnapshot>,
    /// Registered tree provider, if a tree view is mounted.
    tree: RwLock<Option<Arc<dyn TreeProvider>>>,
    /// Operations currently holding a progress guard.
    in_flight: AtomicUsize,
}

impl ExplorerStore {
    /// Creates a store for a fresh local workspace.
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        notifier: Arc<dyn Notifier>,
        environments: Arc<EnvironmentStore>,
    ) -> Self {
        let (workspace, _) = watch::channel(Workspace::guest());
        let (snapshot, _) = watch::channel(ExplorerSnapshot::default());
        Self {
            gateway,
            notifier,
            environments,
            workspace,
            snapshot,
            tree: RwLock::new(None),
            in_flight: AtomicUsize::new(0),
        }
    }

    // ── Reading ──────────────────────────────────────────────────

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> ExplorerSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Project a value out of the current snapshot without copying it.
    pub fn select<R>(&self, f: impl FnOnce(&ExplorerSnapshot) -> R) -> R {
        f(&self.snapshot.borrow())
    }

    /// Watch the snapshot for changes.
    pub fn subscribe(&self) -> watch::Receiver<ExplorerSnapshot> {
        self.snapshot.subscribe()
    }

    /// Whether the busy indicator is set.
    pub fn is_progressing(&self) -> bool {
        self.snapshot.borrow().progressing
    }

    /// The active workspace.
    pub fn workspace(&self) -> Workspace {
        self.workspace.borrow().clone()
    }

    /// Identifier of the active workspace.
    pub fn workspace_id(&self) -> WorkspaceId {
        self.workspace.borrow().id
    }

    /// Watch the active workspace for changes.
    pub fn subscribe_workspace(&self) -> watch::Receiver<Workspace> {
        self.workspace.subscribe()
    }

    /// Replace the active workspace without touching the explorer lists.
    pub fn set_workspace(&self, workspace: Workspace) {
        self.workspace.send_replace(workspace);
    }

    // ── Tree provider ────────────────────────────────────────────

    /// Register the tree provider and initialize it with the current lists.
    pub fn register_tree_provider(&self, provider: Arc<dyn TreeProvider>) {
        let mut tree = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        {
            let snapshot = self.snapshot.borrow();
            provider.init(&snapshot.collections, &snapshot.folders, &snapshot.requests);
        }
        *tree = Some(provider);
        debug!("Tree provider registered");
    }

    /// Drop the registered tree provider, returning it.
    pub fn unregister_tree_provider(&self) -> Option<Arc<dyn TreeProvider>> {
        self.tree
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    // ── Progress ─────────────────────────────────────────────────

    /// Set the busy indicator to `flag`, or flip it when `None`.
    ///
    /// The next operation to start or settle recomputes the flag from the
    /// number of operations in flight.
    pub fn toggle_progress_bar(&self, flag: Option<bool>) {
        self.snapshot
            .send_modify(|s| s.progressing = flag.unwrap_or(!s.progressing));
    }

    fn progress(&self) -> ProgressGuard<'_> {
        ProgressGuard::acquire(&self.in_flight, &self.snapshot)
    }

    // ── Workspace ────────────────────────────────────────────────

    /// Load every collection, folder, request and environment of a workspace
    /// and replace the local state with them.
    pub async fn fetch_explorer(&self, workspace_id: WorkspaceId) -> AppResult<()> {
        let _progress = self.progress();
        debug!(workspace_id = %workspace_id, "Fetching explorer");

        let artifacts = self
            .gateway
            .fetch_workspace_artifacts(workspace_id)
            .await
            .and_then(GatewayResponse::into_result)
            .map_err(|e| self.report("fetch_explorer", e))?;

        let ExplorerArtifacts {
            workspace,
            collections,
            folders,
            requests,
            environments,
        } = artifacts;

        info!(
            workspace_id = %workspace.id,
            collections = collections.len(),
            folders = folders.len(),
            requests = requests.len(),
            environments = environments.len(),
            "Explorer loaded"
        );

        self.workspace.send_replace(workspace);
        self.commit(|snapshot, tree| {
            if let Some(tree) = tree {
                tree.init(&collections, &folders, &requests);
            }
            snapshot.replace(collections, folders, requests);
        });
        self.environments.initialize(environments);
        Ok(())
    }

    /// Load another workspace in place of the current one.
    ///
    /// The current explorer is replaced only once the other workspace has
    /// been fetched. On failure the active workspace, its lists and the tree
    /// stay as they were.
    pub async fn switch_workspace(&self, workspace_id: WorkspaceId) -> AppResult<()> {
        let from = self.workspace_id();
        self.fetch_explorer(workspace_id).await?;
        info!(from = %from, to = %workspace_id, "Workspace switched");
        Ok(())
    }

    /// Reset to a fresh local workspace with empty lists. The registered tree
    /// provider is kept and re-initialized empty.
    pub fn dispose(&self) {
        self.workspace.send_replace(Workspace::guest());
        self.reset_explorer();
        debug!("Explorer disposed");
    }

    fn reset_explorer(&self) {
        self.commit(|snapshot, tree| {
            snapshot.clear();
            if let Some(tree) = tree {
                tree.init(&[], &[], &[]);
            }
        });
        sync_flag(&self.in_flight, &self.snapshot);
        self.environments.dispose();
    }

    // ── Collections ──────────────────────────────────────────────

    /// Create a collection in the active workspace.
    pub async fn create_collection(&self, payload: CreateCollection) -> AppResult<Collection> {
        payload.validate()?;
        require_name(&payload.name, "Collection")?;

        let collection = Collection {
            id: CollectionId::new(),
            name: payload.name,
            description: payload.description,
            workspace_id: self.workspace_id(),
        };

        let _progress = self.progress();
        self.gateway
            .create_collection(&collection)
            .await
            .map_err(|e| self.report("create_collection", e))?;

        self.commit(|snapshot, tree| {
            snapshot.collections.push(collection.clone());
            if let Some(tree) = tree {
                tree.add_collection_item(&collection);
            }
        });

        info!(
            collection_id = %collection.id,
            workspace_id = %collection.workspace_id,
            name = %collection.name,
            "Collection created"
        );
        Ok(collection)
    }

    /// Apply a partial update to a collection.
    pub async fn update_collection(
        &self,
        id: CollectionId,
        patch: UpdateCollection,
    ) -> AppResult<Collection> {
        patch.validate()?;
        if let Some(name) = &patch.name {
            require_name(name, "Collection")?;
        }
        if self.select(|s| s.collection(id).is_none()) {
            return Err(AppError::not_found(format!("Collection {id} not found")));
        }

        let _progress = self.progress();
        self.gateway
            .update_collection(id, &patch)
            .await
            .map_err(|e| self.report("update_collection", e))?;

        let mut merged = None;
        self.commit(|snapshot, tree| {
            if let Some(collection) = snapshot.collection_mut(id) {
                patch.apply(collection);
                if let Some(tree) = tree {
                    tree.update_collection_item(collection);
                }
                merged = Some(collection.clone());
            }
        });

        let collection = merged.ok_or_else(|| {
            AppError::not_found(format!("Collection {id} was removed during the update"))
        })?;
        info!(collection_id = %id, name = %collection.name, "Collection updated");
        Ok(collection)
    }

    /// Delete a collection with everything in it.
    pub async fn delete_collection(&self, id: CollectionId) -> AppResult<()> {
        let _progress = self.progress();
        self.gateway
            .delete_collection(id)
            .await
            .map_err(|e| self.report("delete_collection", e))?;

        let mut removed = 0;
        self.commit(|snapshot, tree| {
            removed = snapshot.remove_collection(id);
            if let Some(tree) = tree {
                tree.delete_collection_item(id);
            }
        });

        info!(collection_id = %id, removed, "Collection deleted");
        Ok(())
    }

    // ── Folders ──────────────────────────────────────────────────

    /// Create a folder in a collection, optionally nested in another folder
    /// of the same collection.
    pub async fn create_folder(&self, payload: CreateFolder) -> AppResult<Folder> {
        payload.validate()?;
        require_name(&payload.name, "Folder")?;

        self.select(|s| -> AppResult<()> {
            if s.collection(payload.collection_id).is_none() {
                return Err(AppError::validation(format!(
                    "Collection {} does not exist in this workspace",
                    payload.collection_id
                )));
            }
            if let Some(parent_id) = payload.folder_id {
                let parent = s.folder(parent_id).ok_or_else(|| {
                    AppError::validation(format!(
                        "Parent folder {parent_id} does not exist in this workspace"
                    ))
                })?;
                if parent.collection_id != payload.collection_id {
                    return Err(AppError::validation(format!(
                        "Parent folder {parent_id} belongs to another collection"
                    )));
                }
            }
            Ok(())
        })?;

        let folder = Folder {
            id: FolderId::new(),
            name: payload.name,
            description: payload.description,
            collection_id: payload.collection_id,
            folder_id: payload.folder_id,
        };

        let _progress = self.progress();
        self.gateway
            .create_folder(&folder)
            .await
            .map_err(|e| self.report("create_folder", e))?;

        self.commit(|snapshot, tree| {
            snapshot.folders.push(folder.clone());
            if let Some(tree) = tree {
                tree.add_folder_item(&folder);
            }
        });

        info!(
            folder_id = %folder.id,
            collection_id = %folder.collection_id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Apply a partial update to a folder.
    pub async fn update_folder(&self, id: FolderId, patch: UpdateFolder) -> AppResult<Folder> {
        patch.validate()?;
        if let Some(name) = &patch.name {
            require_name(name, "Folder")?;
        }
        if self.select(|s| s.folder(id).is_none()) {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }

        let _progress = self.progress();
        self.gateway
            .update_folder(id, &patch)
            .await
            .map_err(|e| self.report("update_folder", e))?;

        let mut merged = None;
        self.commit(|snapshot, tree| {
            if let Some(folder) = snapshot.folder_mut(id) {
                patch.apply(folder);
                if let Some(tree) = tree {
                    tree.update_folder_item(folder);
                }
                merged = Some(folder.clone());
            }
        });

        let folder = merged.ok_or_else(|| {
            AppError::not_found(format!("Folder {id} was removed during the update"))
        })?;
        info!(folder_id = %id, name = %folder.name, "Folder updated");
        Ok(folder)
    }

    /// Delete a folder with its nested folders and requests.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let _progress = self.progress();
        self.gateway
            .delete_folder(id)
            .await
            .map_err(|e| self.report("delete_folder", e))?;

        let mut removed = 0;
        self.commit(|snapshot, tree| {
            removed = snapshot.remove_folder(id);
            if let Some(tree) = tree {
                tree.delete_folder_item(id);
            }
        });

        info!(folder_id = %id, removed, "Folder deleted");
        Ok(())
    }

    // ── Requests ─────────────────────────────────────────────────

    /// Create a request at the workspace root, in a collection, or in a
    /// folder. A request in a folder always carries the folder's collection.
    pub async fn create_request(&self, payload: CreateRequest) -> AppResult<Request> {
        payload.validate()?;
        require_name(&payload.name, "Request")?;

        let collection_id = self.select(|s| -> AppResult<Option<CollectionId>> {
            match (payload.folder_id, payload.collection_id) {
                (Some(folder_id), declared) => {
                    let folder = s.folder(folder_id).ok_or_else(|| {
                        AppError::validation(format!(
                            "Folder {folder_id} does not exist in this workspace"
                        ))
                    })?;
                    if declared.is_some_and(|c| c != folder.collection_id) {
                        return Err(AppError::validation(format!(
                            "Folder {folder_id} belongs to another collection"
                        )));
                    }
                    Ok(Some(folder.collection_id))
                }
                (None, Some(collection_id)) => match s.collection(collection_id) {
                    Some(_) => Ok(Some(collection_id)),
                    None => Err(AppError::validation(format!(
                        "Collection {collection_id} does not exist in this workspace"
                    ))),
                },
                (None, None) => Ok(None),
            }
        })?;

        let request = Request {
            id: RequestId::new(),
            name: payload.name,
            method: payload.method.to_uppercase(),
            url: payload.url,
            description: payload.description,
            workspace_id: self.workspace_id(),
            collection_id,
            folder_id: payload.folder_id,
        };

        let _progress = self.progress();
        self.gateway
            .create_request(&request)
            .await
            .map_err(|e| self.report("create_request", e))?;

        self.commit(|snapshot, tree| {
            snapshot.requests.push(request.clone());
            if let Some(tree) = tree {
                tree.add_request_item(&request);
            }
        });

        info!(
            request_id = %request.id,
            workspace_id = %request.workspace_id,
            name = %request.name,
            "Request created"
        );
        Ok(request)
    }

    /// Apply a partial update to a request.
    pub async fn update_request(&self, id: RequestId, patch: UpdateRequest) -> AppResult<Request> {
        patch.validate()?;
        if let Some(name) = &patch.name {
            require_name(name, "Request")?;
        }
        if self.select(|s| s.request(id).is_none()) {
            return Err(AppError::not_found(format!("Request {id} not found")));
        }

        let _progress = self.progress();
        self.gateway
            .update_request(id, &patch)
            .await
            .map_err(|e| self.report("update_request", e))?;

        let mut merged = None;
        self.commit(|snapshot, tree| {
            if let Some(request) = snapshot.request_mut(id) {
                patch.apply(request);
                if let Some(tree) = tree {
                    tree.update_request_item(request);
                }
                merged = Some(request.clone());
            }
        });

        let request = merged.ok_or_else(|| {
            AppError::not_found(format!("Request {id} was removed during the update"))
        })?;
        info!(request_id = %id, name = %request.name, "Request updated");
        Ok(request)
    }

    /// Delete a request.
    pub async fn delete_request(&self, id: RequestId) -> AppResult<()> {
        let _progress = self.progress();
        self.gateway
            .delete_request(id)
            .await
            .map_err(|e| self.report("delete_request", e))?;

        let mut removed = 0;
        self.commit(|snapshot, tree| {
            removed = snapshot.remove_request(id);
            if let Some(tree) = tree {
                tree.delete_request_item(id);
            }
        });

        info!(request_id = %id, removed, "Request deleted");
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────

    /// Apply a change to the snapshot and the tree provider together.
    ///
    /// The tree lock is taken before the snapshot lock here and in
    /// [`register_tree_provider`](Self::register_tree_provider).
    fn commit(&self, f: impl FnOnce(&mut ExplorerSnapshot, Option<&dyn TreeProvider>)) {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        self.snapshot.send_modify(|snapshot| f(snapshot, tree.as_deref()));
    }

    /// Log and alert a failed remote call, handing the error back.
    fn report(&self, operation: &str, err: AppError) -> AppError {
        warn!(operation, kind = %err.kind, error = %err.message, "Explorer sync failed");
        let labels = Labels::from([("operation".to_string(), operation.to_string())]);
        self.notifier.alert(&err.message, &labels);
        err
    }
}

fn require_name(name: &str, entity: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation(format!("{entity} name cannot be empty")));
    }
    Ok(())
}
