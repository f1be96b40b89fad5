//! Application configuration
//!
//! Loaded from environment variables with the `MEMBER_LEDGER` prefix; nested
//! values are separated by `__`. A `.env` file is read first when present.
//!
//! # Example
//!
//! ```no_run
//! use member_ledger::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod ledger;
mod telemetry;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use ledger::{LedgerConfig, MAX_WRITE_ATTEMPTS};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL settings; absent when running on the in-memory store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `MEMBER_LEDGER__DATABASE__URL=...` -> `database.url`
    /// - `MEMBER_LEDGER__LEDGER__MAX_WRITE_ATTEMPTS=5` -> `ledger.max_write_attempts`
    /// - `MEMBER_LEDGER__TELEMETRY__JSON=true` -> `telemetry.json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMBER_LEDGER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.ledger.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
