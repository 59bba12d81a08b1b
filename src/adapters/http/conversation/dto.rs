//! HTTP DTOs for conversation endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{ConversationSession, IntakeRecord, IntakeState, Turn, TurnOutcome, TurnRole};
use crate::domain::foundation::ErrorCode;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request carrying one user input.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTurnRequest {
    pub content: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One transcript entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub id: String,
    pub role: TurnRole,
    pub content: String,
    pub created_at: String,
}

impl From<&Turn> for TurnResponse {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id().to_string(),
            role: turn.role(),
            content: turn.content().to_string(),
            created_at: turn.created_at().to_rfc3339(),
        }
    }
}

/// Everything the surface needs to render the conversation.
///
/// Carries no busy flag: a turn runs entirely under the session lock, so a
/// reader never observes one in flight. Input is gated by `409` instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub state: IntakeState,
    pub complete: bool,
    pub record: IntakeRecord,
    pub turns: Vec<TurnResponse>,
}

impl From<&ConversationSession> for ConversationResponse {
    fn from(session: &ConversationSession) -> Self {
        Self {
            conversation_id: session.id().to_string(),
            state: session.state(),
            complete: session.is_complete(),
            record: session.record().clone(),
            turns: session.transcript().iter().map(TurnResponse::from).collect(),
        }
    }
}

/// Response to a submitted turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTurnResponse {
    pub reply: String,
    pub is_now_complete: bool,
    pub conversation: ConversationResponse,
}

impl SubmitTurnResponse {
    pub fn new(outcome: &TurnOutcome, session: &ConversationSession) -> Self {
        Self {
            reply: outcome.reply.to_string(),
            is_now_complete: outcome.is_now_complete,
            conversation: session.into(),
        }
    }
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn busy() -> Self {
        Self {
            code: ErrorCode::ConversationBusy.to_string(),
            message: "A turn is already being processed".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}
