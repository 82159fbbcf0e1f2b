//! Reqdeck CLI entry point.
//!
//! Loads configuration, initializes logging and dispatches to a command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use reqdeck_core::config::AppConfig;
use reqdeck_core::error::AppError;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.env.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        tracing::error!(kind = %e.kind, "{}", e.message);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the selected environment.
///
/// `--env` wins over `REQDECK_ENV`, which defaults to `development`.
fn load_configuration(env: Option<&str>) -> Result<AppConfig, AppError> {
    let env = env
        .map(str::to_string)
        .or_else(|| std::env::var("REQDECK_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    AppConfig::load(&env)
}

/// Initialize tracing. Logs go to stderr so command output stays clean.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
