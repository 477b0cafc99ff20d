//! Special commands parser for interactive chat
//!
//! Commands are prefixed with `/` and are case-insensitive. Anything else is
//! treated as a message for Haven.

use colored::Colorize;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command does not take arguments
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start over with a fresh transcript
    Clear,
    /// Print the current session transcript
    History,
    /// Display help information
    Help,
    /// Exit the interactive session
    Exit,
    /// Not a special command; send as a message
    None,
}

/// Parse a line of chat input into a special command
///
/// # Errors
///
/// Returns `CommandError` for unknown commands or unexpected arguments
///
/// # Examples
///
/// ```
/// use haven::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/CLEAR"), Ok(SpecialCommand::Clear));
/// assert_eq!(parse_special_command("hello"), Ok(SpecialCommand::None));
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();

    let parsed = match command.as_str() {
        "/clear" | "/reset" => SpecialCommand::Clear,
        "/history" => SpecialCommand::History,
        "/help" | "/?" => SpecialCommand::Help,
        "/exit" | "/quit" => SpecialCommand::Exit,
        _ => return Err(CommandError::UnknownCommand(command)),
    };

    if let Some(arg) = parts.next() {
        return Err(CommandError::UnsupportedArgument {
            command,
            arg: arg.to_string(),
        });
    }

    Ok(parsed)
}

/// Print the special command help
pub fn print_help() {
    println!("{}", "Commands".bold());
    println!("  /clear     Start over with a fresh conversation");
    println!("  /history   Show this session's messages");
    println!("  /help      Show this help");
    println!("  /exit      Leave the chat (also /quit or Ctrl-D)");
    println!();
    println!(
        "{}",
        "Haven is not a crisis service. If you are in danger, call your local emergency number."
            .yellow()
    );
}
