//! Submission endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where completed intake records are sent.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    /// Base URL; records are POSTed to `{base_url}/user-data`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// When false, records are kept in memory instead of sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl SubmissionConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate submission configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidSubmissionUrl);
        }
        if production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::SubmissionUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidSubmissionTimeout);
        }
        Ok(())
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            enabled: default_enabled(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = SubmissionConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.enabled);
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn rejects_non_http_url() {
        let config = SubmissionConfig {
            base_url: "localhost:3000".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(false), Err(ValidationError::InvalidSubmissionUrl));
    }

    #[test]
    fn production_requires_https() {
        let config = SubmissionConfig::default();
        assert_eq!(
            config.validate(true),
            Err(ValidationError::SubmissionUrlMustBeHttps)
        );

        let config = SubmissionConfig {
            base_url: "https://intake.example.com/api".to_string(),
            ..Default::default()
        };
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = SubmissionConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(false),
            Err(ValidationError::InvalidSubmissionTimeout)
        );
    }

    #[test]
    fn disabled_submission_skips_url_checks() {
        let config = SubmissionConfig {
            base_url: String::new(),
            enabled: false,
            ..Default::default()
        };
        assert!(config.validate(true).is_ok());
    }
}
