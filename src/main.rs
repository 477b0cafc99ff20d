//! Haven - supportive chat companion CLI
//!
#![doc = "Main entry point for the Haven application."]

use anyhow::Result;

use haven::cli::{Cli, Commands};
use haven::commands;
use haven::config::Config;
use haven::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Tracing comes up after config so the configured level applies
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Chat { .. } => {
            tracing::info!("Starting interactive chat mode");
            if config.history.enabled {
                tracing::debug!("Mirroring chat into history");
            }
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Classify { text, json } => {
            commands::classify::run_classify(&text, json)?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(command, &config.history)?;
            Ok(())
        }
    }
}
