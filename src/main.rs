//! LocalAItycs server binary.

use std::sync::Arc;

use localaitycs::adapters::{app_router, ConversationAppState};
use localaitycs::adapters::{HttpSubmissionGateway, InMemorySubmissionGateway};
use localaitycs::application::SubmitTurnHandler;
use localaitycs::config::{AppConfig, SubmissionConfig};
use localaitycs::ports::SubmissionGateway;
use localaitycs::telemetry::init_telemetry;

/// Completed records kept when remote submission is disabled.
const OFFLINE_RETAINED_RECORDS: usize = 100;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;
    init_telemetry(&config.server);

    let gateway = build_gateway(&config.submission)?;
    let state = ConversationAppState::new(SubmitTurnHandler::new(gateway));
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        "LocalAItycs listening"
    );

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!(error = %e, "Server exited with error");
        return Err(e.into());
    }
    Ok(())
}

fn build_gateway(
    submission: &SubmissionConfig,
) -> Result<Arc<dyn SubmissionGateway>, Box<dyn std::error::Error>> {
    if submission.enabled {
        let gateway = HttpSubmissionGateway::new(&submission.base_url, submission.timeout())?;
        tracing::info!(endpoint = gateway.endpoint(), "Submitting completed records over HTTP");
        Ok(Arc::new(gateway))
    } else {
        tracing::warn!(
            retained = OFFLINE_RETAINED_RECORDS,
            "Submission disabled, recent completed records are kept in memory"
        );
        Ok(Arc::new(InMemorySubmissionGateway::bounded(
            OFFLINE_RETAINED_RECORDS,
        )))
    }
}
