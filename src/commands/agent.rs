//! `agent`: show or change the request agent preference.

use std::sync::Arc;

use clap::{Args, Subcommand};

use reqdeck_core::config::AppConfig;
use reqdeck_core::error::AppError;
use reqdeck_service::{Agent, FilePreferenceStore, PlatformStore};

/// Arguments for agent commands
#[derive(Debug, Args)]
pub struct AgentArgs {
    /// Agent subcommand
    #[command(subcommand)]
    pub command: AgentCommand,
}

/// Agent subcommands
#[derive(Debug, Subcommand)]
pub enum AgentCommand {
    /// Print the active agent
    Show,
    /// Persist a new agent
    Set {
        /// One of: proxy, web, desktop, extension
        agent: String,
    },
}

/// Execute an agent command
pub async fn execute(args: &AgentArgs, config: &AppConfig) -> Result<(), AppError> {
    let default_agent: Agent = config.platform.default_agent.parse()?;
    let preferences = Arc::new(FilePreferenceStore::new(&config.platform.preferences_path));
    let platform = PlatformStore::load(preferences, default_agent).await?;

    match &args.command {
        AgentCommand::Show => {
            println!("{}", platform.agent());
        }
        AgentCommand::Set { agent } => {
            let agent: Agent = agent.parse()?;
            platform.change_agent(agent).await?;
            println!("Agent set to {agent}");
        }
    }
    Ok(())
}
