//! Workspace and organization commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use reqdeck_core::config::AppConfig;
use reqdeck_core::error::AppError;
use reqdeck_core::types::OrganizationId;
use reqdeck_entity::{CreateOrganization, CreateWorkspace};
use reqdeck_gateway::HttpGateway;
use reqdeck_service::{LogNotifier, WorkspaceService};

/// Arguments for workspace commands
#[derive(Debug, Args)]
pub struct WorkspaceArgs {
    /// Workspace subcommand
    #[command(subcommand)]
    pub command: WorkspaceCommand,
}

/// Workspace subcommands
#[derive(Debug, Subcommand)]
pub enum WorkspaceCommand {
    /// Create a workspace
    Create {
        /// Workspace name
        #[arg(short, long)]
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Organization ID (omit for a personal workspace)
        #[arg(short, long)]
        org_id: Option<String>,
    },
    /// Check whether a workspace name is free
    Check {
        /// Workspace name
        name: String,
        /// Organization ID
        #[arg(short, long)]
        org_id: Option<String>,
    },
    /// Create an organization with its first workspace
    CreateOrg {
        /// Organization name
        #[arg(short, long)]
        name: String,
        /// Name of the first workspace
        #[arg(short, long, default_value = "General")]
        workspace: String,
    },
    /// Check whether an organization name is free
    CheckOrg {
        /// Organization name
        name: String,
    },
}

/// Execute a workspace command
pub async fn execute(args: &WorkspaceArgs, config: &AppConfig) -> Result<(), AppError> {
    let gateway = Arc::new(HttpGateway::new(&config.gateway)?);
    let service = WorkspaceService::new(gateway, Arc::new(LogNotifier));

    match &args.command {
        WorkspaceCommand::Create {
            name,
            description,
            org_id,
        } => {
            let workspace = service
                .create_workspace(CreateWorkspace {
                    name: name.clone(),
                    description: description.clone(),
                    organization_id: parse_org(org_id.as_deref())?,
                })
                .await?;
            println!("{} ({})", workspace.name, workspace.id);
        }
        WorkspaceCommand::Check { name, org_id } => {
            let available = service
                .check_workspace_name(name, parse_org(org_id.as_deref())?)
                .await?;
            print_availability(name, available);
        }
        WorkspaceCommand::CreateOrg { name, workspace } => {
            let organization = service
                .create_organization(CreateOrganization {
                    name: name.clone(),
                    default_workspace_name: workspace.clone(),
                })
                .await?;
            println!("{} ({})", organization.name, organization.id);
        }
        WorkspaceCommand::CheckOrg { name } => {
            let available = service.check_organization_name(name).await?;
            print_availability(name, available);
        }
    }
    Ok(())
}

fn parse_org(raw: Option<&str>) -> Result<Option<OrganizationId>, AppError> {
    raw.map(|id| {
        id.parse()
            .map_err(|_| AppError::validation(format!("Invalid organization ID: {id}")))
    })
    .transpose()
}

fn print_availability(name: &str, available: bool) {
    if available {
        println!("'{name}' is available");
    } else {
        println!("'{name}' is taken");
    }
}
