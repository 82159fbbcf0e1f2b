//! REST implementation of the remote gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use reqdeck_core::config::gateway::GatewayConfig;
use reqdeck_core::error::AppError;
use reqdeck_core::result::AppResult;
use reqdeck_core::types::{
    CollectionId, FolderId, GatewayResponse, OrganizationId, RequestId, WorkspaceId,
};
use reqdeck_entity::{
    Collection, CreateOrganization, CreateWorkspace, ExplorerArtifacts, Folder,
    NameAvailability, Organization, Request, UpdateCollection, UpdateFolder, UpdateRequest,
    Workspace,
};

use crate::error;
use crate::gateway::{MutationResponse, RemoteGateway};

/// Gateway backed by the REST API over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpGateway {
    /// Create a gateway from configuration.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid gateway URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Gateway URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Base URL joined with `segments`, each percent-encoded as one path segment.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("Gateway URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> AppResult<GatewayResponse<T>> {
        let response = builder.send().await.map_err(error::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(error::from_reqwest)?;

        if !(200..300).contains(&status) {
            return Err(error::from_error_body(status, &body));
        }

        let data = if body.is_empty() {
            serde_json::from_value(serde_json::Value::Null)?
        } else {
            serde_json::from_slice(&body)?
        };
        Ok(GatewayResponse::new(status, data))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> AppResult<GatewayResponse<T>> {
        debug!(%url, "GET");
        self.send(self.request(Method::GET, url)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> AppResult<GatewayResponse<T>> {
        debug!(%url, "POST");
        self.send(self.request(Method::POST, url).json(body)).await
    }

    async fn patch<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> AppResult<MutationResponse> {
        debug!(%url, "PATCH");
        self.send(self.request(Method::PATCH, url).json(body)).await
    }

    async fn delete(&self, url: Url) -> AppResult<MutationResponse> {
        debug!(%url, "DELETE");
        self.send(self.request(Method::DELETE, url)).await
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn fetch_workspace_artifacts(
        &self,
        workspace_id: WorkspaceId,
    ) -> AppResult<GatewayResponse<ExplorerArtifacts>> {
        let id = workspace_id.to_string();
        self.get(self.endpoint(&["workspaces", &id, "artifacts"])?)
            .await
    }

    async fn create_workspace(
        &self,
        payload: &CreateWorkspace,
    ) -> AppResult<GatewayResponse<Workspace>> {
        self.post(self.endpoint(&["workspaces"])?, payload).await
    }

    async fn check_workspace_name(
        &self,
        name: &str,
        organization_id: Option<OrganizationId>,
    ) -> AppResult<GatewayResponse<NameAvailability>> {
        let mut url = self.endpoint(&["workspaces", "availability"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("name", name);
            if let Some(org) = organization_id {
                query.append_pair("org_id", &org.to_string());
            }
        }
        self.get(url).await
    }

    async fn create_organization(
        &self,
        payload: &CreateOrganization,
    ) -> AppResult<GatewayResponse<Organization>> {
        self.post(self.endpoint(&["orgs"])?, payload).await
    }

    async fn check_organization_name(
        &self,
        name: &str,
    ) -> AppResult<GatewayResponse<NameAvailability>> {
        let mut url = self.endpoint(&["orgs", "availability"])?;
        url.query_pairs_mut().append_pair("name", name);
        self.get(url).await
    }

    async fn create_collection(&self, collection: &Collection) -> AppResult<MutationResponse> {
        self.post(self.endpoint(&["collections"])?, collection)
            .await
    }

    async fn update_collection(
        &self,
        id: CollectionId,
        patch: &UpdateCollection,
    ) -> AppResult<MutationResponse> {
        let id = id.to_string();
        self.patch(self.endpoint(&["collections", &id])?, patch)
            .await
    }

    async fn delete_collection(&self, id: CollectionId) -> AppResult<MutationResponse> {
        let id = id.to_string();
        self.delete(self.endpoint(&["collections", &id])?).await
    }

    async fn create_folder(&self, folder: &Folder) -> AppResult<MutationResponse> {
        self.post(self.endpoint(&["folders"])?, folder).await
    }

    async fn update_folder(
        &self,
        id: FolderId,
        patch: &UpdateFolder,
    ) -> AppResult<MutationResponse> {
        let id = id.to_string();
        self.patch(self.endpoint(&["folders", &id])?, patch).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<MutationResponse> {
        let id = id.to_string();
        self.delete(self.endpoint(&["folders", &id])?).await
    }

    async fn create_request(&self, request: &Request) -> AppResult<MutationResponse> {
        self.post(self.endpoint(&["requests"])?, request).await
    }

    async fn update_request(
        &self,
        id: RequestId,
        patch: &UpdateRequest,
    ) -> AppResult<MutationResponse> {
        let id = id.to_string();
        self.patch(self.endpoint(&["requests", &id])?, patch).await
    }

    async fn delete_request(&self, id: RequestId) -> AppResult<MutationResponse> {
        let id = id.to_string();
        self.delete(self.endpoint(&["requests", &id])?).await
    }
}
