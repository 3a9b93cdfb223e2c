//! Session domain module.
//!
//! This module contains the session model, the transcript, the dialogue
//! state machine, and the controller that drives one conversational run.
//!
//! # Module Structure
//!
//! - `model`: Core session value (`Session`)
//! - `message`: Transcript types (`MessageSender`, `ChatMessage`, `Transcript`)
//! - `state`: Dialogue state machine types (`DialogueState`)
//! - `controller`: Per-turn dispatch and action handlers (`SessionController`)

mod controller;
mod message;
mod model;
mod state;

// Re-export public API
pub use controller::SessionController;
pub use message::{ChatMessage, MessageSender, Transcript};
pub use model::Session;
pub use state::DialogueState;
