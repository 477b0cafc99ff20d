use super::open_history;
use crate::cli::HistoryCommand;
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::history::{ChatHistory, StoredMessage};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub fn handle_history(command: HistoryCommand, config: &HistoryConfig) -> Result<()> {
    let history = open_history(config)?;

    match command {
        HistoryCommand::List { limit, json } => {
            let messages = tail(history.load_messages()?, limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&messages)?);
                return Ok(());
            }

            if messages.is_empty() {
                println!("{}", "No chat history found.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row![
                "Time".bold(),
                "From".bold(),
                "Message".bold()
            ]);

            for message in messages {
                let from = if message.is_user {
                    "you".green()
                } else {
                    "haven".cyan()
                };
                table.add_row(prettytable::row![
                    message.timestamp.format("%Y-%m-%d %H:%M"),
                    from,
                    truncate(&message.content, 60)
                ]);
            }

            println!("\nChat History:");
            table.printstd();
            println!();
        }
        HistoryCommand::Clear => {
            history.clear()?;
            println!("{}", "Chat history cleared".green());
        }
    }

    Ok(())
}

/// Keep only the last `limit` messages
fn tail(mut messages: Vec<StoredMessage>, limit: Option<usize>) -> Vec<StoredMessage> {
    if let Some(limit) = limit {
        let skip = messages.len().saturating_sub(limit);
        messages.drain(..skip);
    }
    messages
}

/// Shorten to at most `max` characters, first line only
fn truncate(content: &str, max: usize) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.chars().count() > max || content.lines().nth(1).is_some() {
        let cut: String = first_line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(content: &str) -> StoredMessage {
        StoredMessage {
            id: content.to_string(),
            content: content.to_string(),
            is_user: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_tail_keeps_latest() {
        let messages = vec![message("a"), message("b"), message("c")];
        let kept = tail(messages, Some(2));
        let contents: Vec<&str> = kept.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["b", "c"]);
    }

    #[test]
    fn test_tail_without_limit_keeps_all() {
        let messages = vec![message("a"), message("b")];
        assert_eq!(tail(messages, None).len(), 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("first\nsecond", 60), "first...");
        assert_eq!(truncate("hello\n", 60), "hello");
        assert_eq!(truncate("hello\r\n", 60), "hello");
    }

    #[test]
    fn test_handle_history_clear_and_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = HistoryConfig {
            enabled: true,
            db_path: Some(dir.path().join("history").to_string_lossy().to_string()),
        };

        {
            let history = open_history(&config).unwrap();
            history.save_message("hello", true).unwrap();
        }

        handle_history(
            HistoryCommand::List {
                limit: None,
                json: true,
            },
            &config,
        )
        .unwrap();
        handle_history(HistoryCommand::Clear, &config).unwrap();

        let history = open_history(&config).unwrap();
        assert!(history.load_messages().unwrap().is_empty());
    }
}
