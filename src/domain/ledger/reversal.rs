//! Building write-sets for payment deletion.

use serde::Serialize;

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::MemberId;
use crate::domain::member::Member;
use crate::domain::payment::Payment;

use super::{LedgerError, PaymentReversal};

/// What deleting a payment did to its member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReversalOutcome {
    /// Payment deleted, due date reverted.
    DueDateReverted { member: Member },

    /// Founding payment deleted, member removed.
    MemberRemoved { member_id: MemberId },
}

impl ReversalOutcome {
    pub fn member_deleted(&self) -> bool {
        matches!(self, ReversalOutcome::MemberRemoved { .. })
    }
}

/// Decides how removing `payment` from `member` is applied.
///
/// `latest` is the member's most recently created payment. Only that payment
/// may be removed.
///
/// # Errors
///
/// - `NotFound` if the payment does not belong to the member
/// - `OrderingViolation` if `payment` is not `latest`
/// - `Validation` if the stored due date cannot be restored
pub fn build_reversal(
    member: &Member,
    payment: &Payment,
    latest: &Payment,
) -> Result<PaymentReversal, LedgerError> {
    if payment.member_id != member.id || payment.tenant_id != member.tenant_id {
        return Err(LedgerError::payment_not_found(payment.id));
    }
    if latest.id != payment.id {
        return Err(LedgerError::ordering_violation(payment.id, latest.id));
    }

    if payment.is_founding {
        return Ok(PaymentReversal::RemoveMember {
            tenant_id: member.tenant_id,
            member_id: member.id,
            expected_version: member.version,
            payment_id: payment.id,
        });
    }

    let mut after = member.clone();
    after.restore(payment.due_date, &payment.prior)?;
    let event = AuditEvent::payment_deleted(payment, &after);

    Ok(PaymentReversal::Restore {
        member: after,
        expected_version: member.version,
        payment_id: payment.id,
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PlanId, TenantId};
    use crate::domain::ledger::{build_posting, PaymentDetails};
    use crate::domain::payment::{PaymentMethod, ReceiptNumber};
    use crate::domain::plan::MembershipPlan;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(tenant_id: TenantId, base: u32) -> MembershipPlan {
        MembershipPlan {
            id: PlanId::new(),
            tenant_id,
            name: "Plan".to_string(),
            price_cents: 1000_00,
            base_duration_months: base,
            bonus_duration_months: 0,
        }
    }

    /// Member with a founding monthly payment followed by a quarterly one.
    fn history() -> (Member, Payment, Payment) {
        let tenant = TenantId::new();
        let base = Member::enroll(MemberId::new(), tenant, "Asha", "555", date(2025, 1, 1)).unwrap();
        let details = |paid_on| PaymentDetails {
            amount_cents: 1000_00,
            method: PaymentMethod::Cash,
            payment_date: paid_on,
        };

        let first = build_posting(
            &base,
            &plan(tenant, 1),
            &details(date(2025, 1, 1)),
            None,
            ReceiptNumber::generate("RCP", date(2025, 1, 1)),
        )
        .unwrap();
        let mut member = first.member.clone();
        member.version = 1;

        let second = build_posting(
            &member,
            &plan(tenant, 3),
            &details(date(2025, 2, 5)),
            Some(first.payment.sequence),
            ReceiptNumber::generate("RCP", date(2025, 2, 5)),
        )
        .unwrap();
        let mut member = second.member.clone();
        member.version = 2;

        (member, first.payment, second.payment)
    }

    #[test]
    fn deleting_latest_restores_previous_due_date() {
        let (member, _, latest) = history();
        let reversal = build_reversal(&member, &latest, &latest).unwrap();

        match reversal {
            PaymentReversal::Restore {
                member: after,
                expected_version,
                event,
                ..
            } => {
                assert_eq!(expected_version, 2);
                assert_eq!(after.next_payment_due_date(), Some(date(2025, 2, 1)));
                assert_eq!(after.membership_end_date(), Some(date(2025, 1, 31)));
                assert_eq!(after.plan_id, latest.prior.plan_id);
                assert_eq!(event.change_type, crate::domain::audit::ChangeType::PaymentDeleted);
            }
            other => panic!("expected restore, got {:?}", other),
        }
    }

    #[test]
    fn deleting_earlier_payment_is_an_ordering_violation() {
        let (member, founding, latest) = history();
        let err = build_reversal(&member, &founding, &latest).unwrap_err();
        assert_eq!(err, LedgerError::ordering_violation(founding.id, latest.id));
    }

    #[test]
    fn deleting_founding_payment_removes_member() {
        let (member, founding, _) = history();
        let reversal = build_reversal(&member, &founding, &founding).unwrap();
        assert!(matches!(
            reversal,
            PaymentReversal::RemoveMember { member_id, .. } if member_id == member.id
        ));
    }

    #[test]
    fn payment_of_another_member_is_not_found() {
        let (_, _, latest) = history();
        let (other, _, _) = history();
        let err = build_reversal(&other, &latest, &latest).unwrap_err();
        assert_eq!(err, LedgerError::payment_not_found(latest.id));
    }

    #[test]
    fn outcome_reports_member_deletion() {
        let removed = ReversalOutcome::MemberRemoved {
            member_id: MemberId::new(),
        };
        assert!(removed.member_deleted());
    }
}
