//! Transcript message types.
//!
//! The transcript is the append-only log of everything exchanged in one
//! interactive run. Messages are immutable once appended and are never
//! reordered.

use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    /// Typed by the user.
    User,
    /// Generated by the engine.
    System,
}

/// A single message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonically increasing token, unique within the run.
    pub id: u64,
    /// The sender of the message.
    pub sender: MessageSender,
    /// The message text. System text may carry `**bold**` markup.
    pub text: String,
    /// Display-formatted clock reading taken at append time.
    pub timestamp: String,
}

/// Append-only ordered log of exchanged messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(MessageSender::User, text.into());
    }

    /// Appends an engine-generated message.
    pub fn push_system(&mut self, text: impl Into<String>) {
        self.push(MessageSender::System, text.into());
    }

    fn push(&mut self, sender: MessageSender, text: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            text,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
    }

    /// The messages in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_append_order_and_monotonic_ids() {
        let mut transcript = Transcript::new();
        transcript.push_system("Welcome!");
        transcript.push_user("STATUS");
        transcript.push_system("Please enter your **Farmer ID**.");

        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(messages[1].sender, MessageSender::User);
        assert_eq!(messages[1].text, "STATUS");
    }
}
