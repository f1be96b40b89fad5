//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the ledger domain.

mod date_window;
mod errors;
mod ids;
mod timestamp;

pub use date_window::DateWindow;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AuditEventId, MemberId, PaymentId, PlanId, TenantId};
pub use timestamp::Timestamp;
