//! In-memory adapters.
//!
//! Useful for testing and development. One store implements every storage
//! port so that each write-set is applied under a single lock.

mod ledger_store;

pub use ledger_store::InMemoryLedgerStore;
