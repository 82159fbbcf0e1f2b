//! In-process implementation of the remote gateway.
//!
//! Holds the "server side" of every workspace in memory. Used for offline
//! sessions and as the backend of the explorer tests, with hooks to inject
//! failures and to inspect which calls were made.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use reqdeck_core::error::AppError;
use reqdeck_core::result::AppResult;
use reqdeck_core::types::{
    CollectionId, FolderId, GatewayResponse, OrganizationId, RequestId, WorkspaceId,
};
use reqdeck_entity::{
    Collection, CreateOrganization, CreateWorkspace, ExplorerArtifacts, ExplorerSnapshot, Folder,
    NameAvailability, Organization, Request, UpdateCollection, UpdateFolder, UpdateRequest,
    Workspace,
};

use crate::gateway::{MutationResponse, RemoteGateway};

#[derive(Debug, Default)]
struct ServerState {
    workspaces: HashMap<WorkspaceId, ExplorerArtifacts>,
    organizations: HashMap<OrganizationId, Organization>,
}

impl ServerState {
    fn workspace_of_collection(&self, id: CollectionId) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|(_, a)| a.collections.iter().any(|c| c.id == id))
            .map(|(w, _)| *w)
    }

    fn workspace_of_folder(&self, id: FolderId) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|(_, a)| a.folders.iter().any(|f| f.id == id))
            .map(|(w, _)| *w)
    }

    fn workspace_of_request(&self, id: RequestId) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|(_, a)| a.requests.iter().any(|r| r.id == id))
            .map(|(w, _)| *w)
    }

    fn artifacts_mut(&mut self, id: WorkspaceId) -> AppResult<&mut ExplorerArtifacts> {
        self.workspaces
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Workspace not found"))
    }

    /// Run a snapshot cascade over a workspace's lists.
    fn cascade(artifacts: &mut ExplorerArtifacts, remove: impl FnOnce(&mut ExplorerSnapshot)) {
        let mut snapshot = ExplorerSnapshot {
            collections: std::mem::take(&mut artifacts.collections),
            folders: std::mem::take(&mut artifacts.folders),
            requests: std::mem::take(&mut artifacts.requests),
            progressing: false,
        };
        remove(&mut snapshot);
        artifacts.collections = snapshot.collections;
        artifacts.folders = snapshot.folders;
        artifacts.requests = snapshot.requests;
    }
}

/// Gateway that keeps all server state in memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: RwLock<ServerState>,
    fail_next: Mutex<Option<AppError>>,
    calls: Mutex<Vec<String>>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a workspace with its content, replacing any previous one.
    pub async fn seed(&self, artifacts: ExplorerArtifacts) {
        self.state
            .write()
            .await
            .workspaces
            .insert(artifacts.workspace.id, artifacts);
    }

    /// Make the next call fail with `error` instead of touching state.
    pub async fn fail_next(&self, error: AppError) {
        *self.fail_next.lock().await = Some(error);
    }

    /// Names of the calls received so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Current server-side content of a workspace.
    pub async fn artifacts(&self, workspace_id: WorkspaceId) -> Option<ExplorerArtifacts> {
        self.state.read().await.workspaces.get(&workspace_id).cloned()
    }

    async fn enter(&self, call: &str) -> AppResult<()> {
        debug!(call, "memory gateway call");
        self.calls.lock().await.push(call.to_string());
        match self.fail_next.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn acknowledged() -> serde_json::Value {
    serde_json::json!({ "acknowledged": true })
}

#[async_trait]
impl RemoteGateway for MemoryGateway {
    async fn fetch_workspace_artifacts(
        &self,
        workspace_id: WorkspaceId,
    ) -> AppResult<GatewayResponse<ExplorerArtifacts>> {
        self.enter("fetch_workspace_artifacts").await?;
        self.state
            .read()
            .await
            .workspaces
            .get(&workspace_id)
            .cloned()
            .map(GatewayResponse::ok)
            .ok_or_else(|| AppError::not_found("Workspace not found"))
    }

    async fn create_workspace(
        &self,
        payload: &CreateWorkspace,
    ) -> AppResult<GatewayResponse<Workspace>> {
        self.enter("create_workspace").await?;
        let mut state = self.state.write().await;
        let taken = state.workspaces.values().any(|a| {
            a.workspace.name == payload.name
                && a.workspace.organization_id == payload.organization_id
        });
        if taken {
            return Err(AppError::conflict(format!(
                "Workspace name '{}' is already taken",
                payload.name
            )));
        }
        if let Some(org) = payload.organization_id {
            if !state.organizations.contains_key(&org) {
                return Err(AppError::not_found("Organization not found"));
            }
        }

        let workspace = Workspace {
            id: WorkspaceId::new(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            organization_id: payload.organization_id,
        };
        state
            .workspaces
            .insert(workspace.id, ExplorerArtifacts::empty(workspace.clone()));
        Ok(GatewayResponse::created(workspace))
    }

    async fn check_workspace_name(
        &self,
        name: &str,
        organization_id: Option<OrganizationId>,
    ) -> AppResult<GatewayResponse<NameAvailability>> {
        self.enter("check_workspace_name").await?;
        let state = self.state.read().await;
        let available = !state
            .workspaces
            .values()
            .any(|a| a.workspace.name == name && a.workspace.organization_id == organization_id);
        Ok(GatewayResponse::ok(NameAvailability { available }))
    }

    async fn create_organization(
        &self,
        payload: &CreateOrganization,
    ) -> AppResult<GatewayResponse<Organization>> {
        self.enter("create_organization").await?;
        let mut state = self.state.write().await;
        if state.organizations.values().any(|o| o.name == payload.name) {
            return Err(AppError::conflict(format!(
                "Organization name '{}' is already taken",
                payload.name
            )));
        }

        let organization = Organization {
            id: OrganizationId::new(),
            name: payload.name.clone(),
        };
        let workspace = Workspace {
            id: WorkspaceId::new(),
            name: payload.default_workspace_name.clone(),
            description: None,
            organization_id: Some(organization.id),
        };
        state
            .organizations
            .insert(organization.id, organization.clone());
        state
            .workspaces
            .insert(workspace.id, ExplorerArtifacts::empty(workspace));
        Ok(GatewayResponse::created(organization))
    }

    async fn check_organization_name(
        &self,
        name: &str,
    ) -> AppResult<GatewayResponse<NameAvailability>> {
        self.enter("check_organization_name").await?;
        let available = !self
            .state
            .read()
            .await
            .organizations
            .values()
            .any(|o| o.name == name);
        Ok(GatewayResponse::ok(NameAvailability { available }))
    }

    async fn create_collection(&self, collection: &Collection) -> AppResult<MutationResponse> {
        self.enter("create_collection").await?;
        let mut state = self.state.write().await;
        let artifacts = state.artifacts_mut(collection.workspace_id)?;
        if artifacts.collections.iter().any(|c| c.id == collection.id) {
            return Err(AppError::conflict("Collection already exists"));
        }
        artifacts.collections.push(collection.clone());
        Ok(GatewayResponse::created(acknowledged()))
    }

    async fn update_collection(
        &self,
        id: CollectionId,
        patch: &UpdateCollection,
    ) -> AppResult<MutationResponse> {
        self.enter("update_collection").await?;
        let mut state = self.state.write().await;
        let workspace = state
            .workspace_of_collection(id)
            .ok_or_else(|| AppError::not_found("Collection not found"))?;
        let artifacts = state.artifacts_mut(workspace)?;
        if let Some(collection) = artifacts.collections.iter_mut().find(|c| c.id == id) {
            patch.apply(collection);
        }
        Ok(GatewayResponse::ok(acknowledged()))
    }

    async fn delete_collection(&self, id: CollectionId) -> AppResult<MutationResponse> {
        self.enter("delete_collection").await?;
        let mut state = self.state.write().await;
        if let Some(workspace) = state.workspace_of_collection(id) {
            let artifacts = state.artifacts_mut(workspace)?;
            ServerState::cascade(artifacts, |s| {
                s.remove_collection(id);
            });
        }
        Ok(GatewayResponse::ok(acknowledged()))
    }

    async fn create_folder(&self, folder: &Folder) -> AppResult<MutationResponse> {
        self.enter("create_folder").await?;
        let mut state = self.state.write().await;
        let workspace = state
            .workspace_of_collection(folder.collection_id)
            .ok_or_else(|| AppError::not_found("Collection not found"))?;
        let artifacts = state.artifacts_mut(workspace)?;
        if artifacts.folders.iter().any(|f| f.id == folder.id) {
            return Err(AppError::conflict("Folder already exists"));
        }
        artifacts.folders.push(folder.clone());
        Ok(GatewayResponse::created(acknowledged()))
    }

    async fn update_folder(
        &self,
        id: FolderId,
        patch: &UpdateFolder,
    ) -> AppResult<MutationResponse> {
        self.enter("update_folder").await?;
        let mut state = self.state.write().await;
        let workspace = state
            .workspace_of_folder(id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        let artifacts = state.artifacts_mut(workspace)?;
        if let Some(folder) = artifacts.folders.iter_mut().find(|f| f.id == id) {
            patch.apply(folder);
        }
        Ok(GatewayResponse::ok(acknowledged()))
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<MutationResponse> {
        self.enter("delete_folder").await?;
        let mut state = self.state.write().await;
        if let Some(workspace) = state.workspace_of_folder(id) {
            let artifacts = state.artifacts_mut(workspace)?;
            ServerState::cascade(artifacts, |s| {
                s.remove_folder(id);
            });
        }
        Ok(GatewayResponse::ok(acknowledged()))
    }

    async fn create_request(&self, request: &Request) -> AppResult<MutationResponse> {
        self.enter("create_request").await?;
        let mut state = self.state.write().await;
        let artifacts = state.artifacts_mut(request.workspace_id)?;
        if artifacts.requests.iter().any(|r| r.id == request.id) {
            return Err(AppError::conflict("Request already exists"));
        }
        artifacts.requests.push(request.clone());
        Ok(GatewayResponse::created(acknowledged()))
    }

    async fn update_request(
        &self,
        id: RequestId,
        patch: &UpdateRequest,
    ) -> AppResult<MutationResponse> {
        self.enter("update_request").await?;
        let mut state = self.state.write().await;
        let workspace = state
            .workspace_of_request(id)
            .ok_or_else(|| AppError::not_found("Request not found"))?;
        let artifacts = state.artifacts_mut(workspace)?;
        if let Some(request) = artifacts.requests.iter_mut().find(|r| r.id == id) {
            patch.apply(request);
        }
        Ok(GatewayResponse::ok(acknowledged()))
    }

    async fn delete_request(&self, id: RequestId) -> AppResult<MutationResponse> {
        self.enter("delete_request").await?;
        let mut state = self.state.write().await;
        if let Some(workspace) = state.workspace_of_request(id) {
            let artifacts = state.artifacts_mut(workspace)?;
            ServerState::cascade(artifacts, |s| {
                s.remove_request(id);
            });
        }
        Ok(GatewayResponse::ok(acknowledged()))
    }
}
