//! Conversation command handlers.
//!
//! Handles user turns in the intake conversation.

mod submit_turn;

pub use submit_turn::{HandledTurn, SubmitTurnCommand, SubmitTurnHandler};
