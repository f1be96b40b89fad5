//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Logging configuration
///
/// `RUST_LOG`, when set, takes precedence over `log_level` at startup.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `tracing` filter directive, e.g. `info` or `member_ledger=debug,sqlx=warn`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_plain_info() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn accepts_per_target_directives() {
        let config = TelemetryConfig {
            log_level: "member_ledger=debug,sqlx=warn".to_string(),
            json: true,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_directive() {
        let config = TelemetryConfig {
            log_level: "member_ledger=notalevel".to_string(),
            json: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }
}
