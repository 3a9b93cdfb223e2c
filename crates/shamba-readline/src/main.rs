use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use shamba_core::command::command_reference;
use shamba_core::markup::{Segment, parse_markup};
use shamba_core::session::{ChatMessage, MessageSender, SessionController};
use shamba_interaction::{BackendConfig, HttpBackend};

/// CLI helper for rustyline that provides completion, highlighting, and hints
/// for the fixed command vocabulary.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = command_reference()
            .iter()
            .map(|entry| entry.name.to_string())
            .collect();
        commands.push("HELP".to_string());
        Self { commands }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = line[..pos].to_uppercase();

        if prefix.is_empty() || prefix.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let upper = line.trim().to_uppercase();
        if self.commands.iter().any(|cmd| *cmd == upper) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let prefix = line[..pos].to_uppercase();

        if prefix.is_empty() || prefix.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(&prefix) && cmd.len() > prefix.len())
            .map(|cmd| cmd[prefix.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Prints one engine-generated message.
///
/// The fixed `**bold**` markup subset is re-interpreted here; this renderer
/// is never applied to user-authored text.
fn print_system_message(message: &ChatMessage) {
    for line in message.text.lines() {
        let mut rendered = String::new();
        for segment in parse_markup(line) {
            match segment {
                Segment::Plain(text) => rendered.push_str(&text.bright_blue().to_string()),
                Segment::Bold(text) => rendered.push_str(&text.bright_blue().bold().to_string()),
            }
        }
        println!("{}", rendered);
    }
    println!();
}

/// The main entry point for the Shamba readline application.
///
/// Sets up a rustyline-based REPL that:
/// 1. Connects the session controller to the configured backend
/// 2. Provides command completion for the fixed vocabulary
/// 3. Awaits each turn to completion before reading the next line, so at
///    most one backend request is ever in flight
/// 4. Displays colored output for user and system messages
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // ===== Backend Initialization =====
    let config = BackendConfig::from_env();
    tracing::info!(base_url = %config.base_url, "connecting to backend");
    let backend = HttpBackend::new(config);
    let mut controller = SessionController::new(backend);

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Shamba Assistant ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a command (HELP lists them) or 'quit' to exit.".bright_black()
    );
    println!();

    // Show the welcome message appended at session creation.
    for message in controller.transcript().messages() {
        print_system_message(message);
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle quit command
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(&line);

                // Display user input in green
                println!("{}", format!("> {}", trimmed).green());

                // One full turn: the call settles before the next prompt.
                let appended = controller.handle_line(trimmed).await;
                for message in appended {
                    if message.sender == MessageSender::System {
                        print_system_message(message);
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
