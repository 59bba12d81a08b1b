//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST surface hosting the conversation (axum)
//! - `submission` - Delivery of completed records (reqwest, in-memory)

pub mod http;
pub mod submission;

pub use http::{app_router, ConversationAppState};
pub use submission::{HttpSubmissionGateway, InMemorySubmissionGateway};
