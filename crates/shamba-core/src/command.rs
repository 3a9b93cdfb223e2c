//! The fixed command vocabulary.
//!
//! Free-text lines that are not a pending payload or wizard answer are
//! uppercased and matched against this closed set. Anything else is
//! unrecognized; there is no fuzzy matching.

use std::sync::OnceLock;

/// A top-level command the user can type while no other input is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Clear identifier, draft, and snapshot; start over.
    Reset,
    /// Fetch and summarize the loan status.
    Status,
    /// Start the registration wizard.
    Register,
    /// Start a new loan cycle for an existing farmer.
    Renew,
    /// Show the command reference.
    Help,
    /// Submit a document for the first unlocked stage.
    Upload,
    /// Submit sensor readings.
    Iot,
}

impl Command {
    /// Parses a raw input line into a command.
    ///
    /// The line is trimmed and uppercased before matching, so `status` and
    /// ` STATUS ` both resolve. Returns `None` for anything outside the
    /// fixed vocabulary.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_uppercase().as_str() {
            "RESET" => Some(Self::Reset),
            "STATUS" => Some(Self::Status),
            "REGISTER" => Some(Self::Register),
            "RENEW" => Some(Self::Renew),
            "HELP" => Some(Self::Help),
            "UPLOAD" => Some(Self::Upload),
            "IOT" => Some(Self::Iot),
            _ => None,
        }
    }

    /// The canonical spelling used in prompts and help output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::Status => "STATUS",
            Self::Register => "REGISTER",
            Self::Renew => "RENEW",
            Self::Help => "HELP",
            Self::Upload => "UPLOAD",
            Self::Iot => "IOT",
        }
    }
}

/// A single entry of the static command reference.
#[derive(Debug, Clone)]
pub struct CommandReference {
    /// Canonical command name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl CommandReference {
    const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// Static storage for the command reference (initialized once).
static COMMAND_REFERENCE: OnceLock<Vec<CommandReference>> = OnceLock::new();

/// Returns the full command reference, in help-display order.
pub fn command_reference() -> &'static [CommandReference] {
    COMMAND_REFERENCE.get_or_init(|| {
        vec![
            CommandReference::new("REGISTER", "New user."),
            CommandReference::new("STATUS", "Check loan progress."),
            CommandReference::new("UPLOAD", "Submit a document."),
            CommandReference::new("IOT", "Submit sensor data."),
            CommandReference::new("RENEW", "Start a new loan cycle."),
            CommandReference::new("RESET", "Clear session."),
        ]
    })
}

/// Renders the static HELP message.
pub fn help_text() -> String {
    let mut text = String::from("Commands:");
    for entry in command_reference() {
        text.push_str(&format!("\n- **{}**: {}", entry.name, entry.description));
    }
    text
}
