//! Ledger handlers.
//!
//! Command and query handlers for the member lifecycle and payment ledger.
//!
//! ## Commands
//! - Enrolling members, optionally with a founding payment
//! - Recording payments
//! - Deleting a member's latest payment
//! - Deactivating and reactivating members
//!
//! ## Queries
//! - Get member, list payments, audit trail
//! - Plan catalog lookups

mod deactivate_member;
mod delete_payment;
mod enroll_member;
mod get_audit_trail;
mod get_member;
mod get_plan;
mod list_payments;
mod reactivate_member;
mod record_payment;
mod status_change;
mod write_policy;

pub use write_policy::WritePolicy;

// Commands
pub use deactivate_member::{DeactivateMemberCommand, DeactivateMemberHandler};
pub use delete_payment::{DeletePaymentCommand, DeletePaymentHandler, DeletePaymentResult};
pub use enroll_member::{EnrollMemberCommand, EnrollMemberHandler, EnrollMemberResult, InitialPayment};
pub use reactivate_member::{ReactivateMemberCommand, ReactivateMemberHandler};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};

// Queries
pub use get_audit_trail::{GetAuditTrailHandler, GetAuditTrailQuery};
pub use get_member::{GetMemberHandler, GetMemberQuery};
pub use get_plan::{GetPlanHandler, GetPlanQuery, ListPlansHandler};
pub use list_payments::{ListPaymentsHandler, ListPaymentsQuery};
