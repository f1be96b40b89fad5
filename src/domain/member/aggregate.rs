//! Member aggregate entity.
//!
//! A Member is one person enrolled with a tenant. The aggregate owns the
//! billing schedule (`membership_end_date` / `next_payment_due_date`) and is
//! mutated only by the payment ledger, payment reversal, and explicit status
//! changes.
//!
//! # Design Decisions
//!
//! - **Schedule as one value**: the end date and due date live together in a
//!   `DueWindow`, so `next_payment_due_date == membership_end_date + 1` holds
//!   by construction
//! - **Money in cents**: `plan_amount_cents` is an i64, never a float
//! - **Optimistic versioning**: `version` increases with every persisted
//!   mutation; writers must present the version they read

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, PlanId, TenantId, Timestamp, ValidationError,
};
use crate::domain::plan::MembershipPlan;
use crate::domain::schedule::{compute_due, DueWindow};

use super::MemberStatus;

/// Member aggregate.
///
/// # Invariants
///
/// - `full_name` and `phone` are not blank
/// - `schedule` is `None` only while no due date has ever been established
/// - `version` is bumped by the store on every successful write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub tenant_id: TenantId,
    pub full_name: String,
    pub phone: String,
    pub status: MemberStatus,
    pub joining_date: NaiveDate,

    /// Plan of the most recent payment (or enrollment).
    pub plan_id: Option<PlanId>,

    /// Amount charged for `plan_id`, in cents.
    pub plan_amount_cents: i64,

    /// Current paid-for period, if any.
    pub schedule: Option<DueWindow>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i64,
}

/// Billing fields a payment overwrites, captured so deletion can put them back.
///
/// Status is not part of it: status only changes through deactivation and
/// reactivation, which are audited on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSnapshot {
    pub plan_id: Option<PlanId>,
    pub plan_amount_cents: i64,
}

impl Member {
    /// Enroll a new active member with no billing schedule yet.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the name or phone is blank.
    pub fn enroll(
        id: MemberId,
        tenant_id: TenantId,
        full_name: impl Into<String>,
        phone: impl Into<String>,
        joining_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.into().trim().to_string();
        let phone = phone.into().trim().to_string();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        if phone.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            tenant_id,
            full_name,
            phone,
            status: MemberStatus::Active,
            joining_date,
            plan_id: None,
            plan_amount_cents: 0,
            schedule: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Day the next payment falls due, if a schedule exists.
    pub fn next_payment_due_date(&self) -> Option<NaiveDate> {
        self.schedule.map(|s| s.next_payment_due_date)
    }

    /// Last paid-for day, if a schedule exists.
    pub fn membership_end_date(&self) -> Option<NaiveDate> {
        self.schedule.map(|s| s.membership_end_date)
    }

    /// Date the next payment's period is computed from.
    ///
    /// The current due date when one exists, otherwise the joining date.
    pub fn anchor_date(&self) -> NaiveDate {
        self.next_payment_due_date().unwrap_or(self.joining_date)
    }

    /// Returns true if a payment recorded now would be the founding payment.
    pub fn awaiting_founding_payment(&self) -> bool {
        self.schedule.is_none()
    }

    /// Captures the billing fields a payment is about to overwrite.
    pub fn billing_snapshot(&self) -> BillingSnapshot {
        BillingSnapshot {
            plan_id: self.plan_id,
            plan_amount_cents: self.plan_amount_cents,
        }
    }

    /// Schedule the first due date from the joining date without a payment.
    ///
    /// Used when a member is enrolled on a plan but pays later.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the plan has no duration.
    pub fn schedule_from_joining(&mut self, plan: &MembershipPlan) -> Result<DueWindow, ValidationError> {
        let window = compute_due(self.joining_date, plan)?;
        self.plan_id = Some(plan.id);
        self.plan_amount_cents = plan.price_cents;
        self.schedule = Some(window);
        self.updated_at = Timestamp::now();
        Ok(window)
    }

    /// Extend the schedule by one payment on `plan`.
    ///
    /// Always anchors on the current due date, and always reactivates.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the plan has no duration.
    pub fn apply_payment(
        &mut self,
        plan: &MembershipPlan,
        amount_cents: i64,
    ) -> Result<DueWindow, ValidationError> {
        let window = compute_due(self.anchor_date(), plan)?;
        self.plan_id = Some(plan.id);
        self.plan_amount_cents = amount_cents;
        self.schedule = Some(window);
        self.status = MemberStatus::Active;
        self.updated_at = Timestamp::now();
        Ok(window)
    }

    /// Put the schedule back to `due_date` and restore the captured billing fields.
    ///
    /// The current status is kept.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `due_date` has no predecessor.
    pub fn restore(
        &mut self,
        due_date: NaiveDate,
        snapshot: &BillingSnapshot,
    ) -> Result<DueWindow, ValidationError> {
        let window = DueWindow::due_on(due_date)?;
        self.schedule = Some(window);
        self.plan_id = snapshot.plan_id;
        self.plan_amount_cents = snapshot.plan_amount_cents;
        self.updated_at = Timestamp::now();
        Ok(window)
    }

    /// Mark the member inactive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if already inactive.
    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        self.transition_to(MemberStatus::Inactive)
    }

    /// Mark an inactive member active again. The schedule is untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if already active.
    pub fn reactivate(&mut self) -> Result<(), DomainError> {
        self.transition_to(MemberStatus::Active)
    }

    fn transition_to(&mut self, target: MemberStatus) -> Result<(), DomainError> {
        if self.status == target {
            let attempted = match target {
                MemberStatus::Active => "reactivate",
                MemberStatus::Inactive => "deactivate",
            };
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Member is already {}", target),
            )
            .with_detail("status", target.as_str())
            .with_detail("attempted", attempted));
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
