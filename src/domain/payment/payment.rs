//! Payment entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, PaymentId, PlanId, TenantId, Timestamp, ValidationError};
use crate::domain::member::{BillingSnapshot, Member};
use crate::domain::schedule::days_late;

use super::{PaymentMethod, ReceiptNumber};

/// One recorded payment.
///
/// Payments of a member form an append-only sequence ordered by `sequence`
/// (creation order). Only the last one may be deleted.
///
/// # Invariants
///
/// - `amount_cents > 0`
/// - `due_date` is the member's anchor immediately before this payment
/// - `sequence` is unique per member and strictly increasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub tenant_id: TenantId,
    pub member_id: MemberId,
    pub plan_id: PlanId,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub payment_date: NaiveDate,

    /// Due date the member had before this payment (joining date for a
    /// founding payment). Deleting the payment restores it.
    pub due_date: NaiveDate,

    pub days_late: u32,

    /// True if this payment established the member's first due date.
    pub is_founding: bool,

    /// 1-based creation order within the member.
    pub sequence: i64,

    pub receipt_number: ReceiptNumber,

    /// Member billing fields as they were before this payment.
    pub prior: BillingSnapshot,

    pub created_at: Timestamp,
}

impl Payment {
    /// Builds the payment row for `member` *before* the member is advanced.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the amount is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn for_member(
        id: PaymentId,
        member: &Member,
        plan_id: PlanId,
        amount_cents: i64,
        method: PaymentMethod,
        payment_date: NaiveDate,
        sequence: i64,
        receipt_number: ReceiptNumber,
    ) -> Result<Self, ValidationError> {
        validate_amount(amount_cents)?;
        let due_date = member.anchor_date();

        Ok(Self {
            id,
            tenant_id: member.tenant_id,
            member_id: member.id,
            plan_id,
            amount_cents,
            method,
            payment_date,
            due_date,
            days_late: days_late(due_date, payment_date),
            is_founding: member.awaiting_founding_payment(),
            sequence,
            receipt_number,
            prior: member.billing_snapshot(),
            created_at: Timestamp::now(),
        })
    }
}

/// Rejects zero and negative amounts.
///
/// # Errors
///
/// Returns `OutOfRange` if `amount_cents <= 0`.
pub fn validate_amount(amount_cents: i64) -> Result<(), ValidationError> {
    if amount_cents <= 0 {
        return Err(ValidationError::out_of_range("amount_cents", 1, i64::MAX, amount_cents));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::MembershipPlan;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member() -> Member {
        Member::enroll(MemberId::new(), TenantId::new(), "Asha", "555", date(2025, 1, 1)).unwrap()
    }

    fn monthly() -> MembershipPlan {
        MembershipPlan {
            id: PlanId::new(),
            tenant_id: TenantId::new(),
            name: "Monthly".to_string(),
            price_cents: 1500_00,
            base_duration_months: 1,
            bonus_duration_months: 0,
        }
    }

    fn payment_for(m: &Member, plan: &MembershipPlan, paid_on: NaiveDate, sequence: i64) -> Payment {
        Payment::for_member(
            PaymentId::new(),
            m,
            plan.id,
            plan.price_cents,
            PaymentMethod::Cash,
            paid_on,
            sequence,
            ReceiptNumber::generate("RCP", paid_on),
        )
        .unwrap()
    }

    #[test]
    fn first_payment_is_founding_and_anchors_on_joining_date() {
        let m = member();
        let p = payment_for(&m, &monthly(), date(2025, 1, 1), 1);
        assert!(p.is_founding);
        assert_eq!(p.due_date, date(2025, 1, 1));
        assert_eq!(p.days_late, 0);
    }

    #[test]
    fn later_payment_records_previous_due_date_and_lateness() {
        let mut m = member();
        let plan = monthly();
        m.apply_payment(&plan, plan.price_cents).unwrap();

        let p = payment_for(&m, &plan, date(2025, 2, 5), 2);
        assert!(!p.is_founding);
        assert_eq!(p.due_date, date(2025, 2, 1));
        assert_eq!(p.days_late, 4);
        assert_eq!(p.prior.plan_id, Some(plan.id));
    }

    #[test]
    fn early_payment_is_not_late() {
        let mut m = member();
        let plan = monthly();
        m.apply_payment(&plan, plan.price_cents).unwrap();

        let p = payment_for(&m, &plan, date(2025, 1, 25), 2);
        assert_eq!(p.days_late, 0);
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let m = member();
        let err = Payment::for_member(
            PaymentId::new(),
            &m,
            PlanId::new(),
            0,
            PaymentMethod::Upi,
            date(2025, 1, 1),
            1,
            ReceiptNumber::generate("RCP", date(2025, 1, 1)),
        )
        .unwrap_err();
        assert_eq!(err.field(), "amount_cents");
        assert!(validate_amount(-5).is_err());
        assert!(validate_amount(1).is_ok());
    }
}
