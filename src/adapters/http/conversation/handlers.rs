//! HTTP handlers for conversation endpoints.
//!
//! The surface hosts exactly one conversation. A turn holds the session
//! lock while it runs; a second turn arriving meanwhile is refused with
//! `409 Conflict` instead of queueing.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::Mutex;

use crate::application::{SubmitTurnCommand, SubmitTurnHandler};
use crate::domain::conversation::ConversationSession;

use super::dto::{ConversationResponse, ErrorResponse, SubmitTurnRequest, SubmitTurnResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ConversationAppState {
    session: Arc<Mutex<ConversationSession>>,
    submit_turn: Arc<SubmitTurnHandler>,
}

impl ConversationAppState {
    /// Creates state hosting a fresh conversation.
    pub fn new(submit_turn: SubmitTurnHandler) -> Self {
        Self {
            session: Arc::new(Mutex::new(ConversationSession::new())),
            submit_turn: Arc::new(submit_turn),
        }
    }

    /// Shared handle to the hosted session.
    pub fn session(&self) -> Arc<Mutex<ConversationSession>> {
        Arc::clone(&self.session)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/conversation - Current transcript and record
pub async fn get_conversation(State(state): State<ConversationAppState>) -> Response {
    let session = state.session.lock().await;
    let response = ConversationResponse::from(&*session);
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/conversation/turns - Submit one user input
pub async fn submit_turn(
    State(state): State<ConversationAppState>,
    payload: Result<Json<SubmitTurnRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    let mut session = match state.session.try_lock() {
        Ok(guard) => guard,
        Err(_) => {
            tracing::debug!("Turn refused while another turn is in flight");
            return (StatusCode::CONFLICT, Json(ErrorResponse::busy())).into_response();
        }
    };

    // The submission task is detached; its handle is not needed here.
    let handled = state
        .submit_turn
        .handle(&mut session, SubmitTurnCommand::new(req.content));

    let response = SubmitTurnResponse::new(&handled.outcome, &session);
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/conversation/reset - Discard the conversation and start over
pub async fn reset_conversation(State(state): State<ConversationAppState>) -> Response {
    let mut session = state.session.lock().await;
    let previous = *session.id();
    *session = ConversationSession::new();

    tracing::info!(
        previous_conversation_id = %previous,
        conversation_id = %session.id(),
        "Conversation restarted"
    );

    let response = ConversationResponse::from(&*session);
    (StatusCode::CREATED, Json(response)).into_response()
}

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "ok"
}
