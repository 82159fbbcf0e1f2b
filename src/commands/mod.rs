//! CLI command definitions and dispatch.

pub mod agent;
pub mod explore;
pub mod workspace;

use clap::{Parser, Subcommand};

use reqdeck_core::config::AppConfig;
use reqdeck_core::error::AppError;

/// Reqdeck: API collections explorer
#[derive(Debug, Parser)]
#[command(name = "reqdeck", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (overlays config/{env}.toml)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a workspace and print its explorer tree
    Explore(explore::ExploreArgs),
    /// Create workspaces and organizations
    Workspace(workspace::WorkspaceArgs),
    /// Show or change the request agent
    Agent(agent::AgentArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Explore(args) => explore::execute(args, config).await,
            Commands::Workspace(args) => workspace::execute(args, config).await,
            Commands::Agent(args) => agent::execute(args, config).await,
        }
    }
}
