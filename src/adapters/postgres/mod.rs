//! PostgreSQL adapters - Database implementations for the storage ports.
//!
//! - `PostgresLedgerStore` - Plans, members, payments and audit events
//! - `connect` - Pool construction from `DatabaseConfig`

mod audit_trail;
mod ledger_store;
mod member_repository;
mod payment_ledger;
mod plan_catalog;
mod rows;

pub use ledger_store::PostgresLedgerStore;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Create a connection pool and, if configured, run pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect to database: {}", e)))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
        tracing::info!("database migrations applied");
    }

    Ok(pool)
}
