//! Interactive chat mode handler.
//!
//! Builds a `ConversationStore` over the configured response engine and runs
//! a readline loop. A background task subscribes to store snapshots and
//! shows a typing indicator while a reply is pending.

use super::open_history;
use super::special_commands::{parse_special_command, print_help, CommandError, SpecialCommand};
use crate::config::Config;
use crate::conversation::{ConversationStore, Role, SendOutcome, Turn};
use crate::engine::{classify, ResponseEngine};
use crate::error::Result;
use crate::history::ChatHistory;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
///
/// # Errors
///
/// Returns error if the terminal cannot be driven. History failures are
/// logged and never end the session.
pub async fn run_chat(config: Config) -> Result<()> {
    tracing::info!("Starting interactive chat session");

    let engine = ResponseEngine::from_config(&config.engine);
    let (min_ms, max_ms) = engine.latency_bounds();
    tracing::debug!(min_ms, max_ms, "Simulated reply latency");
    let mut store = ConversationStore::with_context_size(engine, config.engine.context_size);

    let history: Option<Box<dyn ChatHistory>> = if config.history.enabled {
        match open_history(&config.history) {
            Ok(history) => Some(Box::new(history)),
            Err(e) => {
                tracing::warn!("Chat history disabled: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    let mut rx = store.subscribe();
    let indicator = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if rx.borrow_and_update().busy {
                println!("{}", "Haven is typing...".dimmed());
            }
        }
    });

    let mut rl = DefaultEditor::new()?;

    print_banner();
    if let Some(welcome) = store.transcript().first() {
        print_turn(welcome);
    }

    loop {
        match rl.readline(&format!("{} ", "you>".green().bold())) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match route_input(&line) {
                    InputRoute::Command(SpecialCommand::Clear) => {
                        store.clear();
                        println!("{}", "Started a fresh conversation.".dimmed());
                        if let Some(welcome) = store.transcript().first() {
                            print_turn(welcome);
                        }
                        continue;
                    }
                    InputRoute::Command(SpecialCommand::History) => {
                        for turn in store.transcript() {
                            print_turn_with_time(turn);
                        }
                        continue;
                    }
                    InputRoute::Command(SpecialCommand::Help) => {
                        print_help();
                        continue;
                    }
                    InputRoute::Command(SpecialCommand::Exit) => break,
                    InputRoute::Command(SpecialCommand::None) | InputRoute::Message => {}
                    InputRoute::Rejected(e) => {
                        println!("{}", e.to_string().yellow());
                        continue;
                    }
                }

                rl.add_history_entry(line.as_str())?;

                match store.send(&line).await {
                    SendOutcome::Replied(turn) => {
                        print_turn(&turn);
                        if let Some(history) = &history {
                            mirror_exchange(history.as_ref(), &line, &turn);
                        }
                    }
                    SendOutcome::Failed { notice } => println!("{}", notice.yellow()),
                    SendOutcome::Ignored => {}
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                indicator.abort();
                return Err(e.into());
            }
        }
    }

    indicator.abort();
    println!("{}", "Take care of yourself. Goodbye.".cyan());
    tracing::info!(turns = store.transcript().len(), "Chat session ended");
    Ok(())
}

/// Where a line of chat input should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRoute {
    /// A recognised special command
    Command(SpecialCommand),
    /// Text for Haven
    Message,
    /// A malformed command, reported back to the user
    Rejected(CommandError),
}

/// Decide whether a line is a special command or a message
///
/// A line that fails to parse as a command is still sent as a message when
/// it screens as crisis, so a stray `/` never hides a crisis message.
pub fn route_input(line: &str) -> InputRoute {
    match parse_special_command(line) {
        Ok(SpecialCommand::None) => InputRoute::Message,
        Ok(command) => InputRoute::Command(command),
        Err(e) if classify(line).is_crisis() => {
            tracing::debug!("Malformed command screened as crisis, sending as message: {}", e);
            InputRoute::Message
        }
        Err(e) => InputRoute::Rejected(e),
    }
}

/// Copy one user/assistant exchange into the history backend
///
/// Failures are logged; the in-memory transcript stays authoritative.
pub fn mirror_exchange(history: &dyn ChatHistory, user_content: &str, reply: &Turn) {
    if let Err(e) = history.save_message(user_content, true) {
        tracing::warn!("Failed to store user message: {:#}", e);
        return;
    }
    if let Err(e) = history.save_message(reply.content(), reply.is_user()) {
        tracing::warn!("Failed to store reply: {:#}", e);
    }
}

fn print_banner() {
    println!("{}", "Haven".cyan().bold());
    println!(
        "{}",
        "A space to talk things through. Type /help for commands.".dimmed()
    );
    println!(
        "{}\n",
        "Haven is not a crisis service. If you are in danger, call your local emergency number."
            .yellow()
    );
}

fn print_turn(turn: &Turn) {
    match turn.role() {
        Role::Assistant => println!("{} {}\n", "haven>".cyan().bold(), turn.content()),
        Role::User => println!("{} {}", "you>".green().bold(), turn.content()),
        Role::System => println!("{}", turn.content().dimmed()),
    }
}

fn print_turn_with_time(turn: &Turn) {
    print!(
        "{} ",
        turn.timestamp()
            .format("[%H:%M:%S]")
            .to_string()
            .dimmed()
    );
    print_turn(turn);
}
