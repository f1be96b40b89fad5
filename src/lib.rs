//! Member Ledger - membership lifecycle and payment ledger engine
//!
//! Tracks members of multi-tenant membership businesses, the payments they
//! make, and the due dates those payments buy. Every payment extends the
//! member's schedule from the previous due date; deleting the most recent
//! payment rolls the schedule back, and deleting a founding payment removes
//! the member entirely. All writes are tenant-scoped, audited, and guarded
//! by optimistic concurrency.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
