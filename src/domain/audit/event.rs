//! Audit trail entries.
//!
//! Every lifecycle mutation appends exactly one entry. Entries are never
//! edited; they disappear only when their member is removed by deletion of
//! the founding payment.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::foundation::{AuditEventId, MemberId, TenantId, Timestamp};
use crate::domain::member::Member;
use crate::domain::payment::Payment;

/// Kind of lifecycle change an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    MemberCreated,
    PaymentCreated,
    PaymentDeleted,
    StatusChangedToInactive,
    MemberReactivated,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::MemberCreated => "member_created",
            ChangeType::PaymentCreated => "payment_created",
            ChangeType::PaymentDeleted => "payment_deleted",
            ChangeType::StatusChangedToInactive => "status_changed_to_inactive",
            ChangeType::MemberReactivated => "member_reactivated",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable audit trail entry.
///
/// `old_value` / `new_value` are opaque display payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub tenant_id: TenantId,
    pub member_id: MemberId,
    pub change_type: ChangeType,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub created_at: Timestamp,
}

impl AuditEvent {
    /// Creates an entry with arbitrary payloads.
    pub fn new(
        tenant_id: TenantId,
        member_id: MemberId,
        change_type: ChangeType,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Self {
        Self {
            id: AuditEventId::new(),
            tenant_id,
            member_id,
            change_type,
            old_value,
            new_value,
            created_at: Timestamp::now(),
        }
    }

    pub fn member_created(member: &Member) -> Self {
        Self::new(
            member.tenant_id,
            member.id,
            ChangeType::MemberCreated,
            None,
            Some(member_state(member)),
        )
    }

    /// `before` and `after` are the member on either side of the payment.
    pub fn payment_created(payment: &Payment, before: &Member, after: &Member) -> Self {
        Self::new(
            payment.tenant_id,
            payment.member_id,
            ChangeType::PaymentCreated,
            Some(member_state(before)),
            Some(json!({
                "payment_id": payment.id,
                "receipt_number": payment.receipt_number,
                "amount_cents": payment.amount_cents,
                "payment_method": payment.method,
                "payment_date": payment.payment_date,
                "days_late": payment.days_late,
                "is_founding": payment.is_founding,
                "member": member_state(after),
            })),
        )
    }

    /// `after` is the member once the payment has been reversed.
    pub fn payment_deleted(payment: &Payment, after: &Member) -> Self {
        Self::new(
            payment.tenant_id,
            payment.member_id,
            ChangeType::PaymentDeleted,
            Some(json!({
                "payment_id": payment.id,
                "receipt_number": payment.receipt_number,
                "amount_cents": payment.amount_cents,
                "payment_date": payment.payment_date,
            })),
            Some(member_state(after)),
        )
    }

    pub fn deactivated(member: &Member) -> Self {
        Self::new(
            member.tenant_id,
            member.id,
            ChangeType::StatusChangedToInactive,
            Some(json!({ "status": "active" })),
            Some(json!({ "status": member.status })),
        )
    }

    pub fn reactivated(member: &Member) -> Self {
        Self::new(
            member.tenant_id,
            member.id,
            ChangeType::MemberReactivated,
            Some(json!({ "status": "inactive" })),
            Some(json!({ "status": member.status })),
        )
    }
}

fn member_state(member: &Member) -> Value {
    json!({
        "status": member.status,
        "plan_id": member.plan_id,
        "plan_amount_cents": member.plan_amount_cents,
        "membership_end_date": member.membership_end_date(),
        "next_payment_due_date": member.next_payment_due_date(),
    })
}
