//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod conversation;

pub use conversation::{HandledTurn, SubmitTurnCommand, SubmitTurnHandler};
