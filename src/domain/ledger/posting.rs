//! Building write-sets for enrollment and payment recording.
//!
//! Pure functions: they read the current member, compute the next state,
//! and leave persistence to the caller.

use chrono::NaiveDate;

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::PaymentId;
use crate::domain::member::Member;
use crate::domain::payment::{validate_amount, Payment, PaymentMethod, ReceiptNumber};
use crate::domain::plan::MembershipPlan;

use super::{Enrollment, LedgerError, PaymentPosting};

/// Payment details supplied by the operator.
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub payment_date: NaiveDate,
}

/// Builds the posting for one payment against `member`.
///
/// `latest_sequence` is the sequence of the member's newest payment, if any.
///
/// # Errors
///
/// - `Validation` for a non-positive amount or a plan without duration
/// - `NotFound` if the plan belongs to another tenant
pub fn build_posting(
    member: &Member,
    plan: &MembershipPlan,
    details: &PaymentDetails,
    latest_sequence: Option<i64>,
    receipt_number: ReceiptNumber,
) -> Result<PaymentPosting, LedgerError> {
    if plan.tenant_id != member.tenant_id {
        return Err(LedgerError::plan_not_found(plan.id));
    }
    validate_amount(details.amount_cents)?;

    let payment = Payment::for_member(
        PaymentId::new(),
        member,
        plan.id,
        details.amount_cents,
        details.method,
        details.payment_date,
        latest_sequence.map_or(1, |seq| seq + 1),
        receipt_number,
    )?;

    let mut after = member.clone();
    after.apply_payment(plan, details.amount_cents)?;
    let event = AuditEvent::payment_created(&payment, member, &after);

    Ok(PaymentPosting {
        member: after,
        expected_version: member.version,
        payment,
        event,
    })
}

/// Builds the enrollment write-set for a freshly constructed member.
///
/// - With `initial_payment`, that payment becomes the founding payment
///   anchored on the joining date. A plan is required.
/// - With only a plan, the first due date is scheduled from the joining date
///   and no payment is written.
/// - With neither, the member starts without a schedule.
///
/// # Errors
///
/// - `Validation` if a payment is given without a plan, or the amount/plan is invalid
/// - `NotFound` if the plan belongs to another tenant
pub fn build_enrollment(
    member: Member,
    plan: Option<&MembershipPlan>,
    initial_payment: Option<&PaymentDetails>,
    receipt_number: ReceiptNumber,
) -> Result<Enrollment, LedgerError> {
    if let Some(plan) = plan {
        if plan.tenant_id != member.tenant_id {
            return Err(LedgerError::plan_not_found(plan.id));
        }
    }

    match (plan, initial_payment) {
        (None, Some(_)) => Err(LedgerError::validation(
            "plan_id",
            "an initial payment requires a plan",
        )),
        (Some(plan), Some(details)) => {
            let created = AuditEvent::member_created(&member);
            let posting = build_posting(&member, plan, details, None, receipt_number)?;
            Ok(Enrollment {
                member: posting.member,
                founding_payment: Some(posting.payment),
                events: vec![created, posting.event],
            })
        }
        (Some(plan), None) => {
            let mut member = member;
            member.schedule_from_joining(plan)?;
            Ok(Enrollment {
                events: vec![AuditEvent::member_created(&member)],
                member,
                founding_payment: None,
            })
        }
        (None, None) => Ok(Enrollment {
            events: vec![AuditEvent::member_created(&member)],
            member,
            founding_payment: None,
        }),
    }
}
