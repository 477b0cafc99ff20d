//! Command-line interface definition for Haven
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chatting, screening text, and managing history.

use clap::{Parser, Subcommand};

/// Haven - a supportive chat companion
///
/// Haven offers canned supportive replies and points to crisis helplines
/// when an utterance looks high-risk. It is not a crisis service.
#[derive(Parser, Debug, Clone)]
#[command(name = "haven")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Haven
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Do not mirror this session into the history database
        #[arg(long)]
        no_history: bool,

        /// Skip the simulated reply latency
        #[arg(long)]
        fast: bool,
    },

    /// Screen a piece of text for crisis keywords
    Classify {
        /// Text to screen
        text: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear stored chat history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List stored messages, oldest first
    List {
        /// Only show the most recent N messages
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print messages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every stored message
    Clear,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat() {
        let cli = Cli::try_parse_from(["haven", "chat", "--fast"]).unwrap();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        match cli.command {
            Commands::Chat { no_history, fast } => {
                assert!(fast);
                assert!(!no_history);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_classify_json() {
        let cli = Cli::try_parse_from(["haven", "classify", "I want to die", "--json"]).unwrap();
        match cli.command {
            Commands::Classify { text, json } => {
                assert_eq!(text, "I want to die");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_history_list_limit() {
        let cli =
            Cli::try_parse_from(["haven", "-v", "--config", "x.yaml", "history", "list", "-l", "3"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("x.yaml"));
        match cli.command {
            Commands::History {
                command: HistoryCommand::List { limit, json },
            } => {
                assert_eq!(limit, Some(3));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["haven"]).is_err());
    }
}
