//! Submission gateway adapters.
//!
//! - `HttpSubmissionGateway` - POSTs completed records to the remote collaborator
//! - `InMemorySubmissionGateway` - Keeps records in memory (tests, offline runs)

mod http_gateway;
mod in_memory;

pub use http_gateway::HttpSubmissionGateway;
pub use in_memory::InMemorySubmissionGateway;
