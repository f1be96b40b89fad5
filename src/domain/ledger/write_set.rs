//! Atomic write-sets handed to the store.
//!
//! Each value describes everything one ledger operation changes. A store
//! applies a write-set in a single transaction or not at all, after checking
//! the member version it carries.

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::{MemberId, PaymentId, TenantId};
use crate::domain::member::Member;
use crate::domain::payment::Payment;

/// New member, optionally with its founding payment.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub member: Member,
    pub founding_payment: Option<Payment>,

    /// `member_created`, then `payment_created` when a founding payment exists.
    pub events: Vec<AuditEvent>,
}

/// A recorded payment and the member state it produces.
#[derive(Debug, Clone)]
pub struct PaymentPosting {
    /// Member after the payment.
    pub member: Member,

    /// Version the member had when the posting was computed.
    pub expected_version: i64,

    pub payment: Payment,
    pub event: AuditEvent,
}

/// Removal of a member's latest payment.
#[derive(Debug, Clone)]
pub enum PaymentReversal {
    /// Delete the payment and restore the member's previous schedule.
    Restore {
        /// Member after the reversal.
        member: Member,
        expected_version: i64,
        payment_id: PaymentId,
        event: AuditEvent,
    },

    /// Delete the founding payment together with the member and its audit trail.
    RemoveMember {
        tenant_id: TenantId,
        member_id: MemberId,
        expected_version: i64,
        payment_id: PaymentId,
    },
}

impl PaymentReversal {
    pub fn tenant_id(&self) -> TenantId {
        match self {
            PaymentReversal::Restore { member, .. } => member.tenant_id,
            PaymentReversal::RemoveMember { tenant_id, .. } => *tenant_id,
        }
    }

    pub fn member_id(&self) -> MemberId {
        match self {
            PaymentReversal::Restore { member, .. } => member.id,
            PaymentReversal::RemoveMember { member_id, .. } => *member_id,
        }
    }

    pub fn payment_id(&self) -> PaymentId {
        match self {
            PaymentReversal::Restore { payment_id, .. }
            | PaymentReversal::RemoveMember { payment_id, .. } => *payment_id,
        }
    }

    pub fn expected_version(&self) -> i64 {
        match self {
            PaymentReversal::Restore { expected_version, .. }
            | PaymentReversal::RemoveMember { expected_version, .. } => *expected_version,
        }
    }
}

/// Status change of an existing member.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// Member after the change.
    pub member: Member,
    pub expected_version: i64,
    pub event: AuditEvent,
}
