//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides `config.log_level` when set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), DomainError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| DomainError::validation("log_level", e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to install tracing subscriber: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_fails() {
        let config = TelemetryConfig::default();
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
