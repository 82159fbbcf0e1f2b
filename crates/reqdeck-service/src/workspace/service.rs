//! Workspace and organization creation and name checks.
//!
//! These calls are thin passthroughs to the gateway. Creations announce
//! themselves with a success notification. Unlike explorer mutations they do
//! not alert on failure: the creation dialogs that use them show the error
//! inline.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use reqdeck_core::error::AppError;
use reqdeck_core::result::AppResult;
use reqdeck_core::traits::notifier::{Labels, Notifier};
use reqdeck_core::types::{GatewayResponse, OrganizationId};
use reqdeck_entity::{CreateOrganization, CreateWorkspace, Organization, Workspace};
use reqdeck_gateway::RemoteGateway;

/// Workspace and organization service.
#[derive(Debug, Clone)]
pub struct WorkspaceService {
    gateway: Arc<dyn RemoteGateway>,
    notifier: Arc<dyn Notifier>,
}

impl WorkspaceService {
    /// Creates a new workspace service.
    pub fn new(gateway: Arc<dyn RemoteGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self { gateway, notifier }
    }

    /// Create a workspace. With `organization_id` set it is created in that
    /// organization, otherwise it is personal.
    pub async fn create_workspace(&self, payload: CreateWorkspace) -> AppResult<Workspace> {
        payload.validate()?;
        require_name(&payload.name, "Workspace")?;

        let workspace = self
            .gateway
            .create_workspace(&payload)
            .await
            .and_then(GatewayResponse::into_result)
            .inspect_err(|e| warn!(error = %e, "Workspace creation failed"))?;

        info!(
            workspace_id = %workspace.id,
            organization_id = ?workspace.organization_id,
            name = %workspace.name,
            "Workspace created"
        );
        self.notifier.success(
            &format!("Workspace '{}' has been created", workspace.name),
            &Labels::from([("workspace_id".to_string(), workspace.id.to_string())]),
        );
        Ok(workspace)
    }

    /// Whether `name` is free for a workspace, personal or in `organization_id`.
    pub async fn check_workspace_name(
        &self,
        name: &str,
        organization_id: Option<OrganizationId>,
    ) -> AppResult<bool> {
        require_name(name, "Workspace")?;
        let answer = self
            .gateway
            .check_workspace_name(name.trim(), organization_id)
            .await
            .and_then(GatewayResponse::into_result)?;
        Ok(answer.available)
    }

    /// Create an organization together with its first workspace.
    pub async fn create_organization(&self, payload: CreateOrganization) -> AppResult<Organization> {
        payload.validate()?;
        require_name(&payload.name, "Organization")?;
        require_name(&payload.default_workspace_name, "Workspace")?;

        let organization = self
            .gateway
            .create_organization(&payload)
            .await
            .and_then(GatewayResponse::into_result)
            .inspect_err(|e| warn!(error = %e, "Organization creation failed"))?;

        info!(
            organization_id = %organization.id,
            name = %organization.name,
            "Organization created"
        );
        self.notifier.success(
            &format!("Organization '{}' has been created", organization.name),
            &Labels::from([("organization_id".to_string(), organization.id.to_string())]),
        );
        Ok(organization)
    }

    /// Whether `name` is free for an organization.
    pub async fn check_organization_name(&self, name: &str) -> AppResult<bool> {
        require_name(name, "Organization")?;
        let answer = self
            .gateway
            .check_organization_name(name.trim())
            .await
            .and_then(GatewayResponse::into_result)?;
        Ok(answer.available)
    }
}

fn require_name(name: &str, entity: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation(format!("{entity} name cannot be empty")));
    }
    Ok(())
}
