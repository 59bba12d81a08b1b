//! SubmissionGateway port - Interface for persisting completed intake records.
//!
//! The conversation never waits on this port. A completed record is handed
//! to the gateway from a detached task and the result is only logged.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::CompletedRecord;

/// Acknowledgement returned by a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionAck {
    /// Status code reported by the remote collaborator.
    pub status: u16,
    /// Parsed response body, if the collaborator sent JSON.
    pub body: Option<serde_json::Value>,
}

impl SubmissionAck {
    /// Creates an acknowledgement without a body.
    pub fn new(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Attaches a response body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Errors from the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The collaborator answered with a non-success status.
    #[error("submission rejected with status {status}")]
    Rejected {
        /// HTTP status code received.
        status: u16,
    },

    /// The request could not be delivered.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for submitting completed intake records.
///
/// Implementations must not retry on their own; callers log failures and
/// move on.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Submit a completed record.
    async fn submit(&self, record: &CompletedRecord) -> Result<SubmissionAck, SubmissionError>;
}
