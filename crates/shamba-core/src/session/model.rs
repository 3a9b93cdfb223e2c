//! Session domain model.
//!
//! The session is created once per interactive run and lives until the run
//! ends. It is owned exclusively by the session controller; no other
//! component mutates it.

use serde::{Deserialize, Serialize};

use super::state::DialogueState;
use crate::status::StatusSnapshot;

/// The mutable state of one interactive run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Farmer reference, absent until known (registration or STATUS prompt).
    pub farmer_id: Option<u64>,
    /// The single pending expectation of the dialogue.
    pub state: DialogueState,
    /// Last fetched status for the active identifier, replaced wholesale.
    pub last_snapshot: Option<StatusSnapshot>,
}

impl Session {
    /// Creates a fresh session in the initial state.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now.clone(),
            updated_at: now,
            farmer_id: None,
            state: DialogueState::default(),
            last_snapshot: None,
        }
    }

    /// Clears identifier, snapshot, and any pending expectation.
    ///
    /// The registration draft, if any, is discarded with the wizard state.
    pub fn reset(&mut self) {
        self.farmer_id = None;
        self.state = DialogueState::AwaitingCommand;
        self.last_snapshot = None;
        self.touch();
    }

    /// Updates the `updated_at` timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_clean() {
        let session = Session::new();
        assert!(!session.id.is_empty());
        assert_eq!(session.farmer_id, None);
        assert_eq!(session.state, DialogueState::AwaitingCommand);
        assert!(session.last_snapshot.is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.farmer_id = Some(7);
        session.state = DialogueState::AwaitingSensorReading;
        session.reset();
        assert_eq!(session.farmer_id, None);
        assert_eq!(session.state, DialogueState::AwaitingCommand);
        assert!(session.last_snapshot.is_none());
    }
}
