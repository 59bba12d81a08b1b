//! SubmitTurn command handler.
//!
//! Drives one user input through the conversation session and, when that
//! input completes the intake record, launches the submission without
//! waiting for it. The submission result is only logged.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::conversation::{CompletedRecord, ConversationSession, TurnDisposition, TurnOutcome};
use crate::domain::foundation::ConversationId;
use crate::ports::{SubmissionAck, SubmissionError, SubmissionGateway};

/// Command carrying one raw user input.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    /// Text exactly as the user typed it.
    pub content: String,
}

impl SubmitTurnCommand {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Result of handling a turn.
#[derive(Debug)]
pub struct HandledTurn {
    pub outcome: TurnOutcome,
    /// Detached submission task, present only on the completing turn.
    ///
    /// The turn path drops it; tests may await it.
    pub submission: Option<JoinHandle<Result<SubmissionAck, SubmissionError>>>,
}

/// Handler for [`SubmitTurnCommand`].
#[derive(Clone)]
pub struct SubmitTurnHandler {
    gateway: Arc<dyn SubmissionGateway>,
}

impl SubmitTurnHandler {
    /// Creates a new handler with the given gateway.
    pub fn new(gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self { gateway }
    }

    /// Handles one turn.
    ///
    /// Sets the session's busy flag for the duration of the turn. Must be
    /// called from within a tokio runtime, since completion spawns a task.
    pub fn handle(&self, session: &mut ConversationSession, cmd: SubmitTurnCommand) -> HandledTurn {
        session.begin_turn();
        let outcome = session.submit_turn(&cmd.content);
        session.finish_turn();

        match &outcome.disposition {
            TurnDisposition::Accepted { slot } => tracing::debug!(
                conversation_id = %session.id(),
                slot = slot.field_name(),
                "Slot filled"
            ),
            TurnDisposition::Rejected { slot, error } => tracing::debug!(
                conversation_id = %session.id(),
                slot = slot.field_name(),
                error = %error,
                "Input rejected"
            ),
            TurnDisposition::AlreadyComplete => tracing::debug!(
                conversation_id = %session.id(),
                "Input received after completion"
            ),
        }

        let submission = outcome
            .completed
            .clone()
            .map(|record| self.spawn_submission(*session.id(), record));

        HandledTurn {
            outcome,
            submission,
        }
    }

    fn spawn_submission(
        &self,
        conversation_id: ConversationId,
        record: CompletedRecord,
    ) -> JoinHandle<Result<SubmissionAck, SubmissionError>> {
        tracing::info!(conversation_id = %conversation_id, "Intake complete, submitting record");
        let gateway = Arc::clone(&self.gateway);

        tokio::spawn(async move {
            let result = gateway.submit(&record).await;
            match &result {
                Ok(ack) => tracing::info!(
                    conversation_id = %conversation_id,
                    status = ack.status,
                    "Intake record submitted"
                ),
                Err(e) => tracing::warn!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Intake record submission failed"
                ),
            }
            result
        })
    }
}
