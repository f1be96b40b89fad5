//! Audit trail domain module.

mod event;

pub use event::{AuditEvent, ChangeType};
