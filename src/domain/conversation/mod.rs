//! Conversation domain module.
//!
//! Collects the intake record through free-text turns: the field schema,
//! the intake state machine, the transcript and the session aggregate that
//! ties them together.

mod record;
mod schema;
mod session;
mod state;
mod turn;

pub use record::{CompletedRecord, IntakeRecord};
pub use schema::{Slot, SlotValue, CLOSING_MESSAGE, FIRST_PROMPT, GREETING};
pub use session::{ConversationSession, TurnDisposition, TurnOutcome};
pub use state::IntakeState;
pub use turn::{Transcript, Turn, TurnRole};
