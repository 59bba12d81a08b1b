//! Structured logging setup.
//!
//! `RUST_LOG` overrides the configured filter directive when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ServerConfig};

/// Installs the global tracing subscriber for the given server config.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_telemetry(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_target(false))
                .try_init()
                .ok();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_current_span(true))
                .try_init()
                .ok();
        }
    }
}
