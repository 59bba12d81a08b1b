//! HTTP submission gateway.
//!
//! Sends the completed record as JSON to `POST {base_url}/user-data`.
//! Any non-2xx status or transport failure is reported as a
//! `SubmissionError`; nothing is retried here.
//!
//! # Configuration
//!
//! ```ignore
//! let gateway = HttpSubmissionGateway::new("http://localhost:3000/api", Duration::from_secs(10))?;
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::conversation::CompletedRecord;
use crate::ports::{SubmissionAck, SubmissionError, SubmissionGateway};

/// Path appended to the configured base URL.
const USER_DATA_PATH: &str = "user-data";

/// Gateway that POSTs completed records to a remote collaborator.
#[derive(Debug, Clone)]
pub struct HttpSubmissionGateway {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpSubmissionGateway {
    /// Creates a gateway for the given base URL with a per-request timeout.
    ///
    /// # Errors
    ///
    /// - `Transport` if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SubmissionError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), USER_DATA_PATH),
            http_client,
        })
    }

    /// Full URL records are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(&self, record: &CompletedRecord) -> Result<SubmissionAck, SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, "Submitting intake record");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        let ack = SubmissionAck::new(status.as_u16());
        match response.json::<serde_json::Value>().await {
            Ok(body) => Ok(ack.with_body(body)),
            Err(_) => Ok(ack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> CompletedRecord {
        CompletedRecord {
            budget: 5000.0,
            city: "São Paulo".to_string(),
            investment_type: "Ice cream shop".to_string(),
            target_audience: "College students".to_string(),
        }
    }

    fn gateway_for(server: &MockServer) -> HttpSubmissionGateway {
        HttpSubmissionGateway::new(&format!("{}/api", server.uri()), Duration::from_secs(5))
            .unwrap()
    }

    #[test]
    fn endpoint_joins_base_url_and_path() {
        let gateway =
            HttpSubmissionGateway::new("http://localhost:3000/api/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(gateway.endpoint(), "http://localhost:3000/api/user-data");
    }

    #[tokio::test]
    async fn posts_record_as_camel_case_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user-data"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "budget": 5000.0,
                "city": "São Paulo",
                "investmentType": "Ice cream shop",
                "targetAudience": "College students",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = gateway_for(&server).submit(&record()).await.unwrap();

        assert_eq!(ack.status, 201);
        assert_eq!(ack.body, Some(json!({ "id": 1 })));
    }

    #[tokio::test]
    async fn success_without_json_body_still_acks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user-data"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let ack = gateway_for(&server).submit(&record()).await.unwrap();

        assert_eq!(ack.status, 204);
        assert!(ack.body.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user-data"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway_for(&server).submit(&record()).await;

        assert!(matches!(result, Err(SubmissionError::Rejected { status: 500 })));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let gateway =
            HttpSubmissionGateway::new("http://127.0.0.1:1/api", Duration::from_secs(1)).unwrap();

        let result = gateway.submit(&record()).await;

        assert!(matches!(result, Err(SubmissionError::Transport(_))));
    }
}
