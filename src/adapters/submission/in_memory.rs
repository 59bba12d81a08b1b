//! In-memory submission gateway.
//!
//! Records every submitted record instead of sending it anywhere. Used by
//! tests and by the binary when remote submission is disabled. Supports
//! error injection so failure paths can be exercised.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::conversation::CompletedRecord;
use crate::ports::{SubmissionAck, SubmissionError, SubmissionGateway};

/// Gateway that keeps submissions in memory.
///
/// Clones share the same storage, so a test can hand one clone to the
/// handler and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionGateway {
    inner: Arc<Mutex<GatewayState>>,
}

#[derive(Debug, Default)]
struct GatewayState {
    submitted: VecDeque<CompletedRecord>,
    attempts: usize,
    failure: Option<SubmissionError>,
    /// Oldest records are evicted beyond this many; unbounded when `None`.
    retain: Option<usize>,
}

impl InMemorySubmissionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that keeps only the most recent `retain` records.
    pub fn bounded(retain: usize) -> Self {
        let gateway = Self::new();
        gateway.state().retain = Some(retain);
        gateway
    }

    /// Gateway that rejects every submission with `error`.
    pub fn failing(error: SubmissionError) -> Self {
        let gateway = Self::new();
        gateway.set_failure(Some(error));
        gateway
    }

    /// Sets or clears the error returned by subsequent submissions.
    pub fn set_failure(&self, error: Option<SubmissionError>) {
        self.state().failure = error;
    }

    /// Records accepted so far.
    pub fn submitted(&self) -> Vec<CompletedRecord> {
        self.state().submitted.iter().cloned().collect()
    }

    /// Calls to `submit`, including failed ones.
    pub fn attempts(&self) -> usize {
        self.state().attempts
    }

    fn state(&self) -> std::sync::MutexGuard<'_, GatewayState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SubmissionGateway for InMemorySubmissionGateway {
    async fn submit(&self, record: &CompletedRecord) -> Result<SubmissionAck, SubmissionError> {
        let mut state = self.state();
        state.attempts += 1;

        if let Some(error) = state.failure.clone() {
            return Err(error);
        }

        state.submitted.push_back(record.clone());
        if let Some(retain) = state.retain {
            while state.submitted.len() > retain {
                state.submitted.pop_front();
                tracing::debug!(retain, "Evicted oldest in-memory submission");
            }
        }
        Ok(SubmissionAck::new(201))
    }
}
