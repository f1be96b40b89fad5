//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process store for tests and development
//! - `postgres` - PostgreSQL-backed store
//! - `clock` - System and fixed clocks
//! - `tenant` - Fixed tenant context

pub mod clock;
pub mod memory;
pub mod postgres;
pub mod tenant;

pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryLedgerStore;
pub use postgres::PostgresLedgerStore;
pub use tenant::FixedTenantContext;
