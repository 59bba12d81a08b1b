//! Route configuration for conversation endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_conversation, health, reset_conversation, submit_turn, ConversationAppState,
};

/// Creates the conversation router.
///
/// Routes:
/// - `GET /health` - Liveness probe
/// - `GET /api/conversation` - Transcript and record
/// - `POST /api/conversation/turns` - Submit one user input
/// - `POST /api/conversation/reset` - Start a new conversation
pub fn conversation_router() -> Router<ConversationAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/conversation", get(get_conversation))
        .route("/api/conversation/turns", post(submit_turn))
        .route("/api/conversation/reset", post(reset_conversation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::submission::InMemorySubmissionGateway;
    use crate::application::SubmitTurnHandler;
    use crate::domain::conversation::CLOSING_MESSAGE;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(gateway: &InMemorySubmissionGateway) -> (Router, ConversationAppState) {
        let state = ConversationAppState::new(SubmitTurnHandler::new(Arc::new(gateway.clone())));
        (conversation_router().with_state(state.clone()), state)
    }

    fn post_turn(content: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/conversation/turns")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "content": content }).to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (app, _) = app_with(&InMemorySubmissionGateway::new());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_conversation_returns_seeded_transcript() {
        let (app, _) = app_with(&InMemorySubmissionGateway::new());
        let response = app
            .oneshot(Request::builder().uri("/api/conversation").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["turns"].as_array().unwrap().len(), 2);
        assert!(json.get("busy").is_none());
        assert_eq!(json["complete"], false);
    }

    #[tokio::test]
    async fn post_turn_returns_reply_and_updated_record() {
        let (app, _) = app_with(&InMemorySubmissionGateway::new());
        let response = app.oneshot(post_turn("5000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["reply"], "Which city will the business be located in?");
        assert_eq!(json["conversation"]["record"]["budget"], 5000.0);
        assert_eq!(json["conversation"]["turns"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn invalid_input_is_a_normal_reply_not_an_http_error() {
        let (app, _) = app_with(&InMemorySubmissionGateway::new());
        let response = app.oneshot(post_turn("abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["reply"], "Please enter a valid numeric value for the budget.");
        assert!(json["conversation"]["record"]["budget"].is_null());
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (app, _) = app_with(&InMemorySubmissionGateway::new());
        let request = Request::builder()
            .method("POST")
            .uri("/api/conversation/turns")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"text\": 1}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn turn_while_session_is_locked_is_conflict() {
        let (app, state) = app_with(&InMemorySubmissionGateway::new());
        let session = state.session();
        let _held = session.lock().await;

        let response = app.oneshot(post_turn("5000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = json_body(response).await;
        assert_eq!(json["code"], "CONVERSATION_BUSY");
    }

    #[tokio::test]
    async fn full_conversation_over_http_submits_once() {
        let gateway = InMemorySubmissionGateway::new();
        let (app, _) = app_with(&gateway);

        let mut last = serde_json::Value::Null;
        for input in ["5000", "São Paulo", "Ice cream shop", "College students", "anything"] {
            let response = app.clone().oneshot(post_turn(input)).await.unwrap();
            last = json_body(response).await;
        }

        assert_eq!(last["reply"], CLOSING_MESSAGE);
        assert_eq!(last["conversation"]["complete"], true);

        // Submission runs on a detached task; give it a chance to finish.
        for _ in 0..50 {
            if gateway.attempts() > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(gateway.submitted().len(), 1);
    }

    #[tokio::test]
    async fn reset_starts_a_fresh_conversation() {
        let (app, state) = app_with(&InMemorySubmissionGateway::new());
        app.clone().oneshot(post_turn("5000")).await.unwrap();
        let before = *state.session().lock().await.id();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/conversation/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_ne!(json["conversationId"], before.to_string());
        assert!(json["record"]["budget"].is_null());
        assert_eq!(json["turns"].as_array().unwrap().len(), 2);
    }
}
