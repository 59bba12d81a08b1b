//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `LOCALAITYCS` prefix and nested
//! values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use localaitycs::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod server;
mod submission;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use submission::SubmissionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Where completed records are delivered
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `LOCALAITYCS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LOCALAITYCS__SUBMISSION__BASE_URL=...` -> `submission.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("LOCALAITYCS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.submission.validate(self.is_production())?;
        Ok(())
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "LOCALAITYCS__SERVER__PORT",
        "LOCALAITYCS__SERVER__ENVIRONMENT",
        "LOCALAITYCS__SERVER__LOG_FORMAT",
        "LOCALAITYCS__SUBMISSION__BASE_URL",
        "LOCALAITYCS__SUBMISSION__ENABLED",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.submission.base_url, "http://localhost:3000/api");
        assert!(config.submission.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("LOCALAITYCS__SERVER__PORT", "3001");
        env::set_var("LOCALAITYCS__SERVER__LOG_FORMAT", "json");
        env::set_var("LOCALAITYCS__SUBMISSION__BASE_URL", "http://intake:4000/api");
        env::set_var("LOCALAITYCS__SUBMISSION__ENABLED", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.submission.base_url, "http://intake:4000/api");
        assert!(!config.submission.enabled);
    }

    #[test]
    fn test_production_rejects_plain_http_submission() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("LOCALAITYCS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::SubmissionUrlMustBeHttps)
        );
    }

    #[test]
    fn test_unparseable_port_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("LOCALAITYCS__SERVER__PORT", "not-a-port");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
