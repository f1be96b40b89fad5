//! Due-date calculator.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::plan::MembershipPlan;

/// The paid-for period a member holds after a payment.
///
/// # Invariants
///
/// - `next_payment_due_date == membership_end_date + 1 day`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueWindow {
    /// Last day covered by the payment.
    pub membership_end_date: NaiveDate,

    /// Day the next payment falls due.
    pub next_payment_due_date: NaiveDate,
}

impl DueWindow {
    /// Builds the window whose next payment falls due on `next_payment_due_date`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the date has no predecessor.
    pub fn due_on(next_payment_due_date: NaiveDate) -> Result<Self, ValidationError> {
        let membership_end_date = next_payment_due_date.pred_opt().ok_or_else(|| {
            ValidationError::invalid_format("next_payment_due_date", "date out of supported range")
        })?;
        Ok(Self {
            membership_end_date,
            next_payment_due_date,
        })
    }
}

/// Computes the period bought by one payment on `plan`, starting at `anchor`.
///
/// Month arithmetic is calendar based: a day that does not exist in the
/// target month clamps to that month's last day (Jan 31 + 1 month = Feb 28).
///
/// # Errors
///
/// - `OutOfRange` if the plan's total duration is below one month
/// - `InvalidFormat` if the result falls outside the supported date range
pub fn compute_due(anchor: NaiveDate, plan: &MembershipPlan) -> Result<DueWindow, ValidationError> {
    let total_months = plan.total_duration_months();
    if total_months < 1 {
        return Err(ValidationError::out_of_range(
            "total_duration_months",
            1,
            i64::from(u32::MAX),
            i64::from(total_months),
        ));
    }

    let next_due = anchor
        .checked_add_months(Months::new(total_months))
        .ok_or_else(|| {
            ValidationError::invalid_format("next_payment_due_date", "date out of supported range")
        })?;

    DueWindow::due_on(next_due)
}

/// Days between the scheduled due date and the day the payment was made.
///
/// Early and on-time payments yield zero; the result is never negative.
pub fn days_late(due_date: NaiveDate, payment_date: NaiveDate) -> u32 {
    let days = payment_date.signed_duration_since(due_date).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
