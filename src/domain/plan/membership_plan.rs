//! Membership plan value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, TenantId, ValidationError};

/// A purchasable plan in a tenant's catalog.
///
/// # Invariants
///
/// - `base_duration_months >= 1`
/// - `price_cents >= 0`
/// - `name` is not blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: PlanId,
    pub tenant_id: TenantId,
    pub name: String,

    /// List price in cents.
    pub price_cents: i64,

    pub base_duration_months: u32,

    /// Free months granted on top of the base duration.
    pub bonus_duration_months: u32,
}

impl MembershipPlan {
    /// Creates a validated plan.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `OutOfRange` if the price is negative or the base duration is zero
    pub fn new(
        id: PlanId,
        tenant_id: TenantId,
        name: impl Into<String>,
        price_cents: i64,
        base_duration_months: u32,
        bonus_duration_months: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if price_cents < 0 {
            return Err(ValidationError::out_of_range("price_cents", 0, i64::MAX, price_cents));
        }
        if base_duration_months < 1 {
            return Err(ValidationError::out_of_range(
                "base_duration_months",
                1,
                i64::from(u32::MAX),
                i64::from(base_duration_months),
            ));
        }

        Ok(Self {
            id,
            tenant_id,
            name,
            price_cents,
            base_duration_months,
            bonus_duration_months,
        })
    }

    /// Months of membership one payment on this plan buys.
    pub fn total_duration_months(&self) -> u32 {
        self.base_duration_months
            .saturating_add(self.bonus_duration_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(base: u32, bonus: u32) -> Result<MembershipPlan, ValidationError> {
        MembershipPlan::new(PlanId::new(), TenantId::new(), "Quarterly", 4500_00, base, bonus)
    }

    #[test]
    fn total_duration_adds_bonus() {
        let plan = plan(3, 1).unwrap();
        assert_eq!(plan.total_duration_months(), 4);
    }

    #[test]
    fn zero_base_duration_is_rejected() {
        let err = plan(0, 2).unwrap_err();
        assert_eq!(err.field(), "base_duration_months");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = MembershipPlan::new(PlanId::new(), TenantId::new(), "  ", 100, 1, 0).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = MembershipPlan::new(PlanId::new(), TenantId::new(), "Monthly", -1, 1, 0).unwrap_err();
        assert_eq!(err.field(), "price_cents");
    }

    #[test]
    fn free_plan_is_allowed() {
        assert!(MembershipPlan::new(PlanId::new(), TenantId::new(), "Trial", 0, 1, 0).is_ok());
    }
}
