//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use reqdeck_core::result::AppResult;
use reqdeck_core::types::{
    CollectionId, FolderId, GatewayResponse, OrganizationId, RequestId, WorkspaceId,
};
use reqdeck_entity::{
    Collection, CreateCollection, CreateFolder, CreateOrganization, CreateRequest,
    CreateWorkspace, ExplorerArtifacts, Folder, NameAvailability, Organization, Request,
    UpdateCollection, UpdateFolder, UpdateRequest, Workspace,
};
use reqdeck_gateway::{MemoryGateway, MutationResponse, RemoteGateway};
use reqdeck_service::{EnvironmentStore, ExplorerStore, MemoryNotifier};
use reqdeck_tree::MemoryTreeProvider;

/// Explorer store wired to in-memory collaborators, with a workspace
/// already seeded on the gateway and loaded into the store.
pub struct TestApp {
    pub store: Arc<ExplorerStore>,
    pub gateway: Arc<MemoryGateway>,
    pub notifier: Arc<MemoryNotifier>,
    pub tree: Arc<MemoryTreeProvider>,
    pub environments: Arc<EnvironmentStore>,
    pub workspace_id: WorkspaceId,
}

impl TestApp {
    /// A store with an empty remote workspace loaded.
    pub async fn new() -> Self {
        Self::with_artifacts(|_| {}).await
    }

    /// A store whose remote workspace is prepared by `seed` before loading.
    pub async fn with_artifacts(seed: impl FnOnce(&mut ExplorerArtifacts)) -> Self {
        let gateway = Arc::new(MemoryGateway::new());
        let app = Self::with_gateway(gateway.clone(), gateway).await;
        app.reload_with(seed).await;
        app
    }

    /// A store calling `remote`, with `gateway` as the backing state.
    pub async fn with_gateway(gateway: Arc<MemoryGateway>, remote: Arc<dyn RemoteGateway>) -> Self {
        let notifier = Arc::new(MemoryNotifier::new());
        let environments = Arc::new(EnvironmentStore::new());
        let tree = Arc::new(MemoryTreeProvider::new());
        let store = Arc::new(ExplorerStore::new(
            remote,
            notifier.clone(),
            environments.clone(),
        ));
        store.register_tree_provider(tree.clone());

        let workspace = Workspace {
            id: WorkspaceId::new(),
            name: "Integration".to_string(),
            description: None,
            organization_id: None,
        };
        let workspace_id = workspace.id;
        gateway.seed(ExplorerArtifacts::empty(workspace.clone())).await;
        store.set_workspace(workspace);

        Self {
            store,
            gateway,
            notifier,
            tree,
            environments,
            workspace_id,
        }
    }

    /// Reseed the remote workspace and fetch it.
    pub async fn reload_with(&self, seed: impl FnOnce(&mut ExplorerArtifacts)) {
        let mut artifacts = ExplorerArtifacts::empty(self.store.workspace());
        seed(&mut artifacts);
        self.gateway.seed(artifacts).await;
        self.store
            .fetch_explorer(self.workspace_id)
            .await
            .expect("Failed to fetch seeded workspace");
        self.tree.clear_calls();
    }

    /// Create a collection through the store.
    pub async fn collection(&self, name: &str) -> Collection {
        self.store
            .create_collection(CreateCollection {
                name: name.to_string(),
                description: None,
            })
            .await
            .expect("Failed to create collection")
    }

    /// Create a folder through the store.
    pub async fn folder(&self, collection: &Collection, parent: Option<&Folder>, name: &str) -> Folder {
        self.store
            .create_folder(CreateFolder {
                name: name.to_string(),
                description: None,
                collection_id: collection.id,
                folder_id: parent.map(|p| p.id),
            })
            .await
            .expect("Failed to create folder")
    }

    /// Create a request in a folder through the store.
    pub async fn request_in(&self, folder: &Folder, name: &str) -> Request {
        self.store
            .create_request(CreateRequest {
                name: name.to_string(),
                method: "GET".to_string(),
                url: format!("/{}", name.to_lowercase().replace(' ', "-")),
                folder_id: Some(folder.id),
                ..Default::default()
            })
            .await
            .expect("Failed to create request")
    }

    /// Identifiers in the snapshot and in the tree must agree.
    pub fn assert_in_sync(&self) {
        assert_eq!(
            self.store.select(|s| s.node_ids()),
            self.tree.node_ids(),
            "snapshot and tree provider diverged"
        );
    }
}

/// A gateway whose calls wait for a permit before reaching the memory
/// gateway, so tests can observe operations while they are in flight.
#[derive(Debug)]
pub struct GatedGateway {
    inner: Arc<MemoryGateway>,
    gate: Semaphore,
}

impl GatedGateway {
    pub fn new(inner: Arc<MemoryGateway>) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
        }
    }

    /// Let `n` pending or future calls through.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    async fn pass(&self) {
        self.gate
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
    }
}

#[async_trait]
impl RemoteGateway for GatedGateway {
    async fn fetch_workspace_artifacts(
        &self,
        workspace_id: WorkspaceId,
    ) -> AppResult<GatewayResponse<ExplorerArtifacts>> {
        self.pass().await;
        self.inner.fetch_workspace_artifacts(workspace_id).await
    }

    async fn create_workspace(
        &self,
        payload: &CreateWorkspace,
    ) -> AppResult<GatewayResponse<Workspace>> {
        self.pass().await;
        self.inner.create_workspace(payload).await
    }

    async fn check_workspace_name(
        &self,
        name: &str,
        organization_id: Option<OrganizationId>,
    ) -> AppResult<GatewayResponse<NameAvailability>> {
        self.pass().await;
        self.inner.check_workspace_name(name, organization_id).await
    }

    async fn create_organization(
        &self,
        payload: &CreateOrganization,
    ) -> AppResult<GatewayResponse<Organization>> {
        self.pass().await;
        self.inner.create_organization(payload).await
    }

    async fn check_organization_name(
        &self,
        name: &str,
    ) -> AppResult<GatewayResponse<NameAvailability>> {
        self.pass().await;
        self.inner.check_organization_name(name).await
    }

    async fn create_collection(&self, collection: &Collection) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.create_collection(collection).await
    }

    async fn update_collection(
        &self,
        id: CollectionId,
        patch: &UpdateCollection,
    ) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.update_collection(id, patch).await
    }

    async fn delete_collection(&self, id: CollectionId) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.delete_collection(id).await
    }

    async fn create_folder(&self, folder: &Folder) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.create_folder(folder).await
    }

    async fn update_folder(&self, id: FolderId, patch: &UpdateFolder) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.update_folder(id, patch).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.delete_folder(id).await
    }

    async fn create_request(&self, request: &Request) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.create_request(request).await
    }

    async fn update_request(
        &self,
        id: RequestId,
        patch: &UpdateRequest,
    ) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.update_request(id, patch).await
    }

    async fn delete_request(&self, id: RequestId) -> AppResult<MutationResponse> {
        self.pass().await;
        self.inner.delete_request(id).await
    }
}
