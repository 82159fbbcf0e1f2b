//! Remote sync gateway trait.

use async_trait::async_trait;

use reqdeck_core::result::AppResult;
use reqdeck_core::types::{
    CollectionId, FolderId, GatewayResponse, OrganizationId, RequestId, WorkspaceId,
};
use reqdeck_entity::{
    Collection, CreateOrganization, CreateWorkspace, ExplorerArtifacts, Folder,
    NameAvailability, Organization, Request, UpdateCollection, UpdateFolder, UpdateRequest,
    Workspace,
};

/// Response of a create/update/delete call. The body is not interpreted.
pub type MutationResponse = GatewayResponse<serde_json::Value>;

/// Thin RPC boundary to the remote store.
///
/// A call either resolves with a status and payload or fails with an
/// [`AppError`](reqdeck_core::AppError) whose message is fit to show the user.
#[async_trait]
pub trait RemoteGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a workspace with all its collections, folders, requests and
    /// environments.
    async fn fetch_workspace_artifacts(
        &self,
        workspace_id: WorkspaceId,
    ) -> AppResult<GatewayResponse<ExplorerArtifacts>>;

    /// Create a workspace, personal or inside an organization.
    async fn create_workspace(
        &self,
        payload: &CreateWorkspace,
    ) -> AppResult<GatewayResponse<Workspace>>;

    /// Check whether a workspace name is still free.
    async fn check_workspace_name(
        &self,
        name: &str,
        organization_id: Option<OrganizationId>,
    ) -> AppResult<GatewayResponse<NameAvailability>>;

    /// Create an organization.
    async fn create_organization(
        &self,
        payload: &CreateOrganization,
    ) -> AppResult<GatewayResponse<Organization>>;

    /// Check whether an organization name is still free.
    async fn check_organization_name(
        &self,
        name: &str,
    ) -> AppResult<GatewayResponse<NameAvailability>>;

    /// Persist a new collection.
    async fn create_collection(&self, collection: &Collection) -> AppResult<MutationResponse>;

    /// Persist a collection patch.
    async fn update_collection(
        &self,
        id: CollectionId,
        patch: &UpdateCollection,
    ) -> AppResult<MutationResponse>;

    /// Delete a collection and everything in it.
    async fn delete_collection(&self, id: CollectionId) -> AppResult<MutationResponse>;

    /// Persist a new folder.
    async fn create_folder(&self, folder: &Folder) -> AppResult<MutationResponse>;

    /// Persist a folder patch.
    async fn update_folder(&self, id: FolderId, patch: &UpdateFolder)
    -> AppResult<MutationResponse>;

    /// Delete a folder and everything in it.
    async fn delete_folder(&self, id: FolderId) -> AppResult<MutationResponse>;

    /// Persist a new request.
    async fn create_request(&self, request: &Request) -> AppResult<MutationResponse>;

    /// Persist a request patch.
    async fn update_request(
        &self,
        id: RequestId,
        patch: &UpdateRequest,
    ) -> AppResult<MutationResponse>;

    /// Delete a request.
    async fn delete_request(&self, id: RequestId) -> AppResult<MutationResponse>;
}
