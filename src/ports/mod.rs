//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubmissionGateway` - Persists a completed intake record

mod submission_gateway;

pub use submission_gateway::{SubmissionAck, SubmissionError, SubmissionGateway};
