//! Dialogue state types for the session state machine.

use serde::{Deserialize, Serialize};

use crate::registration::{RegStep, RegistrationDraft};

/// The single pending expectation of the session, as one tagged union.
///
/// Payload expectations (upload file name, sensor reading), the registration
/// wizard, and the identifier prompts are all variants of the same enum, so
/// the machine can never hold two pending expectations at once. There is no
/// terminal state; the machine is re-enterable indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DialogueState {
    /// Waiting for a top-level command (initial state).
    AwaitingCommand,
    /// The next line is the farmer identifier for a status fetch.
    AwaitingFarmerId,
    /// The next line is the farmer identifier for a season renewal.
    AwaitingRenewId,
    /// A snapshot is cached; waiting for a follow-up command.
    AwaitingAction,
    /// Inside the registration wizard; the draft travels with the state.
    Registering {
        step: RegStep,
        draft: RegistrationDraft,
    },
    /// The next line is a file name to upload (or CANCEL).
    AwaitingUploadFilename,
    /// The next line is a sensor reading payload (or CANCEL).
    AwaitingSensorReading,
}

impl Default for DialogueState {
    fn default() -> Self {
        Self::AwaitingCommand
    }
}

impl DialogueState {
    /// Enters the wizard at its first step with an empty draft.
    pub fn start_registration() -> Self {
        Self::Registering {
            step: RegStep::first(),
            draft: RegistrationDraft::default(),
        }
    }

    /// True while the next input line is consumed as a payload or wizard
    /// answer rather than parsed as a command.
    pub fn expects_input(&self) -> bool {
        !matches!(self, Self::AwaitingCommand | Self::AwaitingAction)
    }
}
