//! `explore`: fetch a workspace and print its tree.

use std::sync::Arc;

use clap::Args;

use reqdeck_core::config::AppConfig;
use reqdeck_core::error::AppError;
use reqdeck_core::types::WorkspaceId;
use reqdeck_gateway::HttpGateway;
use reqdeck_service::{EnvironmentStore, ExplorerStore, LogNotifier};
use reqdeck_tree::{MemoryTreeProvider, outline};

/// Arguments for the explore command
#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Workspace ID
    pub workspace_id: String,

    /// Highlight titles matching this term
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Execute the explore command
pub async fn execute(args: &ExploreArgs, config: &AppConfig) -> Result<(), AppError> {
    let workspace_id: WorkspaceId = args
        .workspace_id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid workspace ID: {}", args.workspace_id)))?;

    let gateway = Arc::new(HttpGateway::new(&config.gateway)?);
    let environments = Arc::new(EnvironmentStore::new());
    let store = ExplorerStore::new(gateway, Arc::new(LogNotifier), environments.clone());

    let tree = Arc::new(MemoryTreeProvider::new());
    store.register_tree_provider(tree.clone());
    store.fetch_explorer(workspace_id).await?;

    let workspace = store.workspace();
    println!("{} ({})", workspace.name, workspace.id);
    if tree.is_empty() {
        println!("(empty)");
    } else {
        print!("{}", outline(&tree, args.search.as_deref()));
    }

    let environments = environments.environments();
    if !environments.is_empty() {
        println!();
        println!("Environments:");
        for environment in environments {
            println!("  {} ({} variables)", environment.name, environment.variables.len());
        }
    }
    Ok(())
}
