//! The session controller state machine.
//!
//! Reads one line of input per turn, routes it according to the current
//! dialogue state, performs at most one backend call, and appends the
//! outcome to the transcript. The controller owns the session exclusively
//! and awaits every backend call to completion before the next line is
//! accepted, so there is never more than one outstanding request.

use crate::backend::{BackendApi, DocumentUpload, SensorReadings};
use crate::command::{Command, help_text};
use crate::hint::render_status_summary;
use crate::registration::{RegStep, RegistrationDraft};
use crate::session::message::{ChatMessage, Transcript};
use crate::session::model::Session;
use crate::session::state::DialogueState;

const WELCOME: &str = "Welcome! Type **REGISTER** to sign up, **STATUS** with an ID, \
    or **RENEW** to start a new loan cycle. Type **HELP** for commands.";

/// Drives one conversational session against a backend.
pub struct SessionController<B: BackendApi> {
    backend: B,
    session: Session,
    transcript: Transcript,
}

impl<B: BackendApi> SessionController<B> {
    /// Creates a controller with a fresh session and the welcome message
    /// already appended.
    pub fn new(backend: B) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_system(WELCOME);
        Self {
            backend,
            session: Session::new(),
            transcript,
        }
    }

    /// The session state, read-only for callers.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The full transcript so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handles one line of input as a complete turn.
    ///
    /// Returns the messages appended during this turn (the echoed user line
    /// plus every engine response). Blank lines are ignored and append
    /// nothing.
    pub async fn handle_line(&mut self, line: &str) -> &[ChatMessage] {
        let mark = self.transcript.len();
        let text = line.trim().to_string();
        if text.is_empty() {
            return &self.transcript.messages()[mark..];
        }
        self.transcript.push_user(&text);
        self.session.touch();

        match self.session.state.clone() {
            DialogueState::AwaitingUploadFilename => self.handle_upload_payload(&text).await,
            DialogueState::AwaitingSensorReading => self.handle_sensor_payload(&text).await,
            DialogueState::Registering { step, draft } => {
                self.handle_registration_step(step, draft, &text).await
            }
            DialogueState::AwaitingFarmerId => self.handle_farmer_id(&text).await,
            DialogueState::AwaitingRenewId => self.handle_renew_id(&text).await,
            DialogueState::AwaitingCommand | DialogueState::AwaitingAction => {
                self.handle_command(&text).await
            }
        }

        &self.transcript.messages()[mark..]
    }

    // ------------------------------------------------------------------
    // Command dispatch
    // ------------------------------------------------------------------

    async fn handle_command(&mut self, text: &str) {
        match Command::parse(text) {
            Some(Command::Reset) => {
                self.session.reset();
                self.transcript
                    .push_system("Chat reset. Type **REGISTER** or **STATUS**.");
            }
            Some(Command::Status) => match self.session.farmer_id {
                Some(farmer_id) => self.refresh_status(farmer_id).await,
                None => {
                    self.session.state = DialogueState::AwaitingFarmerId;
                    self.transcript
                        .push_system("Please enter your **Farmer ID**.");
                }
            },
            Some(Command::Register) => {
                self.session.state = DialogueState::start_registration();
                self.transcript.push_system(RegStep::first().prompt());
            }
            Some(Command::Renew) => {
                self.session.state = DialogueState::AwaitingRenewId;
                self.transcript
                    .push_system("Enter the **Farmer ID** for the loan to renew.");
            }
            Some(Command::Help) => self.transcript.push_system(help_text()),
            Some(Command::Upload) => {
                if self.session.farmer_id.is_none() {
                    self.transcript.push_system("Use **STATUS** first.");
                } else {
                    self.session.state = DialogueState::AwaitingUploadFilename;
                    self.transcript
                        .push_system("Type the file name to upload or **CANCEL**.");
                }
            }
            Some(Command::Iot) => {
                if self.session.farmer_id.is_none() {
                    self.transcript.push_system("Use **STATUS** first.");
                } else {
                    self.session.state = DialogueState::AwaitingSensorReading;
                    self.transcript
                        .push_system("Type sensor readings (e.g. moisture:12) or **CANCEL**.");
                }
            }
            None => self
                .transcript
                .push_system("Unknown command. Type **HELP**."),
        }
    }

    // ------------------------------------------------------------------
    // Identifier prompts
    // ------------------------------------------------------------------

    fn parse_identifier(text: &str) -> Option<u64> {
        text.trim().parse::<u64>().ok().filter(|id| *id > 0)
    }

    async fn handle_farmer_id(&mut self, text: &str) {
        match Self::parse_identifier(text) {
            Some(farmer_id) => {
                self.session.farmer_id = Some(farmer_id);
                self.refresh_status(farmer_id).await;
            }
            // Invalid input re-prompts; the expectation stays pending.
            None => self
                .transcript
                .push_system("Invalid Farmer ID. Please enter a positive number."),
        }
    }

    async fn handle_renew_id(&mut self, text: &str) {
        match Self::parse_identifier(text) {
            Some(farmer_id) => {
                self.session.farmer_id = Some(farmer_id);
                self.renew(farmer_id).await;
            }
            None => self
                .transcript
                .push_system("Invalid Farmer ID. Please enter a positive number."),
        }
    }

    // ------------------------------------------------------------------
    // Action handlers: one backend call each, then a refresh or a failure
    // report
    // ------------------------------------------------------------------

    async fn refresh_status(&mut self, farmer_id: u64) {
        tracing::debug!(farmer_id, "fetching status");
        match self.backend.fetch_status(farmer_id, None).await {
            Ok(snapshot) => {
                let summary = render_status_summary(&snapshot, farmer_id);
                self.session.last_snapshot = Some(snapshot);
                self.session.state = DialogueState::AwaitingAction;
                self.transcript.push_system(summary);
            }
            Err(err) => {
                tracing::warn!(farmer_id, error = %err, "status fetch failed");
                self.session.state = DialogueState::AwaitingCommand;
                self.transcript.push_system(format!(
                    "Error fetching status for ID {}: {}",
                    farmer_id,
                    err.user_message()
                ));
            }
        }
    }

    async fn handle_registration_step(
        &mut self,
        step: RegStep,
        mut draft: RegistrationDraft,
        answer: &str,
    ) {
        if let Err(err) = draft.record(step, answer) {
            // Re-prompt the same step; the draft keeps earlier answers.
            self.transcript.push_system(err.user_message());
            self.session.state = DialogueState::Registering { step, draft };
            return;
        }
        match step.next() {
            Some(next) => {
                self.session.state = DialogueState::Registering { step: next, draft };
                self.transcript.push_system(next.prompt());
            }
            None => self.submit_registration(draft).await,
        }
    }

    async fn submit_registration(&mut self, draft: RegistrationDraft) {
        let request = match draft.finalize() {
            Ok(request) => request,
            Err(err) => {
                self.session.state = DialogueState::AwaitingCommand;
                self.transcript
                    .push_system(format!("Registration failed: {}", err.user_message()));
                return;
            }
        };
        match self.backend.register(&request).await {
            Ok(farmer_id) => {
                tracing::info!(farmer_id, "registration complete");
                self.session.farmer_id = Some(farmer_id);
                self.transcript.push_system(format!(
                    "Registration complete! Your Farmer ID is **{}**. \
                     Type **STATUS** to check your loan progress.",
                    farmer_id
                ));
                self.refresh_status(farmer_id).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "registration failed");
                self.session.state = DialogueState::AwaitingCommand;
                self.transcript
                    .push_system(format!("Registration failed: {}", err.user_message()));
            }
        }
    }

    async fn handle_upload_payload(&mut self, payload: &str) {
        self.session.state = DialogueState::AwaitingAction;
        if payload.eq_ignore_ascii_case("CANCEL") {
            self.transcript.push_system("Upload cancelled.");
            return;
        }
        let Some(farmer_id) = self.session.farmer_id else {
            self.session.state = DialogueState::AwaitingCommand;
            self.transcript.push_system("Use **STATUS** first.");
            return;
        };
        let stage_number = self
            .session
            .last_snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.first_unlocked_stage())
            .map(|stage| stage.stage_number);
        let Some(stage_number) = stage_number else {
            self.transcript
                .push_system("No unlocked stage found; upload aborted.");
            return;
        };
        let upload = DocumentUpload::from_file_name(stage_number, payload);
        match self.backend.upload_document(farmer_id, &upload).await {
            Ok(_) => {
                self.transcript
                    .push_system("Upload successful. Awaiting Field Officer approval.");
                self.refresh_status(farmer_id).await;
            }
            Err(err) => {
                tracing::warn!(farmer_id, stage_number, error = %err, "upload failed");
                self.transcript
                    .push_system(format!("Upload failed: {}", err.user_message()));
            }
        }
    }

    async fn handle_sensor_payload(&mut self, payload: &str) {
        self.session.state = DialogueState::AwaitingAction;
        if payload.eq_ignore_ascii_case("CANCEL") {
            self.transcript.push_system("Sensor upload cancelled.");
            return;
        }
        let Some(farmer_id) = self.session.farmer_id else {
            self.session.state = DialogueState::AwaitingCommand;
            self.transcript.push_system("Use **STATUS** first.");
            return;
        };
        let readings = SensorReadings::parse(payload);
        match self.backend.ingest_sensor(farmer_id, &readings).await {
            Ok(ack) => {
                if ack.drought_flag {
                    self.transcript
                        .push_system("Drought risk detected. Insurance claim filed.");
                } else {
                    self.transcript.push_system("Moisture levels appear normal.");
                }
                self.refresh_status(farmer_id).await;
            }
            Err(err) => {
                tracing::warn!(farmer_id, error = %err, "sensor ingest failed");
                self.transcript
                    .push_system(format!("Sensor upload failed: {}", err.user_message()));
            }
        }
    }

    async fn renew(&mut self, farmer_id: u64) {
        match self.backend.renew_season(farmer_id).await {
            Ok(message) => {
                self.transcript.push_system(message);
                self.refresh_status(farmer_id).await;
            }
            Err(err) => {
                tracing::warn!(farmer_id, error = %err, "renewal failed");
                self.transcript
                    .push_system(format!("Renewal failed: {}", err.user_message()));
            }
        }
        // A renewal turn always ends back at the command prompt.
        self.session.state = DialogueState::AwaitingCommand;
    }
}
