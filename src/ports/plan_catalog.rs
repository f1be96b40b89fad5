//! Plan catalog port (read side).
//!
//! Plans are managed outside the ledger. The ledger only looks them up.

use crate::domain::foundation::{DomainError, PlanId, TenantId};
use crate::domain::plan::MembershipPlan;
use async_trait::async_trait;

/// Read access to a tenant's membership plans.
#[async_trait]
pub trait PlanCatalog: Send + Sync {
    /// Find a plan by ID within a tenant.
    ///
    /// Returns `None` if the plan does not exist or belongs to another tenant.
    async fn find_plan(
        &self,
        tenant_id: &TenantId,
        id: &PlanId,
    ) -> Result<Option<MembershipPlan>, DomainError>;

    /// List all plans of a tenant, ordered by name.
    async fn list_plans(&self, tenant_id: &TenantId) -> Result<Vec<MembershipPlan>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn PlanCatalog) {}
    }
}
