//! HTTP adapter for conversation endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    ConversationResponse, ErrorResponse, SubmitTurnRequest, SubmitTurnResponse, TurnResponse,
};
pub use handlers::ConversationAppState;
pub use routes::conversation_router;
