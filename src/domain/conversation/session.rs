//! Conversation session aggregate.
//!
//! The session owns the intake record and the transcript for the lifetime
//! of one conversation. [`ConversationSession::submit_turn`] is the single
//! entry point that advances it.
//!
//! # Invariants
//!
//! - Every call appends exactly one user turn and one assistant turn
//! - `state` always equals `IntakeState::of(&record)`
//! - The completed record is handed out at most once

use crate::domain::foundation::{ConversationId, DomainError, StateMachine, Timestamp, ValidationError};

use super::record::{CompletedRecord, IntakeRecord};
use super::schema::{Slot, SlotValue, CLOSING_MESSAGE, FIRST_PROMPT, GREETING};
use super::state::IntakeState;
use super::turn::{Transcript, Turn};

/// How a single input was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnDisposition {
    /// The input filled `slot`.
    Accepted { slot: Slot },
    /// The input failed `slot`'s rule; nothing changed.
    Rejected { slot: Slot, error: ValidationError },
    /// The record was already complete; nothing changed.
    AlreadyComplete,
}

impl TurnDisposition {
    /// Assistant reply for this disposition.
    pub fn reply(&self) -> &'static str {
        match self {
            Self::Accepted { slot } => slot.success_prompt(),
            Self::Rejected { slot, .. } => slot.error_message(),
            Self::AlreadyComplete => CLOSING_MESSAGE,
        }
    }
}

/// Result of [`ConversationSession::submit_turn`].
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Record after the turn.
    pub record: IntakeRecord,
    /// Text of the assistant turn that was appended.
    pub reply: &'static str,
    /// True when the record is complete after this turn.
    pub is_now_complete: bool,
    /// Present only on the turn that completed the record.
    pub completed: Option<CompletedRecord>,
    /// How the input was classified against the pending slot.
    pub disposition: TurnDisposition,
}

/// One intake conversation: record, transcript and the busy flag.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: ConversationId,
    record: IntakeRecord,
    transcript: Transcript,
    state: IntakeState,
    busy: bool,
    submitted: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ConversationSession {
    /// Starts a conversation seeded with the greeting and the first prompt.
    pub fn new() -> Self {
        let now = Timestamp::now();
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant(GREETING));
        transcript.append(Turn::assistant(FIRST_PROMPT));

        Self {
            id: ConversationId::new(),
            record: IntakeRecord::new(),
            transcript,
            state: IntakeState::default(),
            busy: false,
            submitted: false,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == IntakeState::Complete
    }

    /// True while a turn is being processed. Advisory, for the input control.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// True once the completed record has been handed out for submission.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Busy flag
    // ─────────────────────────────────────────────────────────────────────────

    /// Marks a turn as in flight.
    pub fn begin_turn(&mut self) {
        self.busy = true;
    }

    /// Clears the in-flight marker once the assistant reply is appended.
    pub fn finish_turn(&mut self) {
        self.busy = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turn processing
    // ─────────────────────────────────────────────────────────────────────────

    /// Processes one user input against the pending slot.
    ///
    /// The raw text is recorded verbatim before validation. Once complete,
    /// further calls only append the closing message.
    ///
    /// # Panics
    ///
    /// If a validated value cannot be written to the pending slot. That
    /// means the record and the state machine disagree, which the no-gaps
    /// invariant rules out.
    pub fn submit_turn(&mut self, raw_text: &str) -> TurnOutcome {
        self.transcript.append(Turn::user(raw_text));

        let disposition = match self.state.pending_slot() {
            None => TurnDisposition::AlreadyComplete,
            Some(slot) => match slot.parse(raw_text) {
                Err(error) => TurnDisposition::Rejected { slot, error },
                Ok(value) => {
                    if let Err(err) = self.accept(slot, value) {
                        tracing::error!(
                            conversation_id = %self.id,
                            error = %err,
                            "Intake record rejected a validated value"
                        );
                        panic!("intake invariant violated: {}", err);
                    }
                    TurnDisposition::Accepted { slot }
                }
            },
        };

        let reply = disposition.reply();
        self.transcript.append(Turn::assistant(reply));
        self.updated_at = Timestamp::now();

        let completed = match &disposition {
            TurnDisposition::Accepted { .. } if self.is_complete() && !self.submitted => {
                self.submitted = true;
                self.record.completed()
            }
            _ => None,
        };

        TurnOutcome {
            record: self.record.clone(),
            reply,
            is_now_complete: self.is_complete(),
            completed,
            disposition,
        }
    }

    fn accept(&mut self, slot: Slot, value: SlotValue) -> Result<(), DomainError> {
        let next = self.state.transition_to(self.state.on_valid_input())?;
        self.record.fill(slot, value)?;
        self.state = next;
        debug_assert_eq!(self.state, IntakeState::of(&self.record));
        Ok(())
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
