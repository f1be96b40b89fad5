//! Plan catalog queries.

use std::sync::Arc;

use crate::domain::foundation::PlanId;
use crate::domain::ledger::LedgerError;
use crate::domain::plan::MembershipPlan;
use crate::ports::{PlanCatalog, TenantContext};

/// Query to get one plan.
#[derive(Debug, Clone)]
pub struct GetPlanQuery {
    pub plan_id: PlanId,
}

pub struct GetPlanHandler {
    tenant: Arc<dyn TenantContext>,
    plans: Arc<dyn PlanCatalog>,
}

impl GetPlanHandler {
    pub fn new(tenant: Arc<dyn TenantContext>, plans: Arc<dyn PlanCatalog>) -> Self {
        Self { tenant, plans }
    }

    pub async fn handle(&self, query: GetPlanQuery) -> Result<MembershipPlan, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        self.plans
            .find_plan(&tenant_id, &query.plan_id)
            .await?
            .ok_or_else(|| LedgerError::plan_not_found(query.plan_id))
    }
}

/// Lists the caller's plans ordered by name.
pub struct ListPlansHandler {
    tenant: Arc<dyn TenantContext>,
    plans: Arc<dyn PlanCatalog>,
}

impl ListPlansHandler {
    pub fn new(tenant: Arc<dyn TenantContext>, plans: Arc<dyn PlanCatalog>) -> Self {
        Self { tenant, plans }
    }

    pub async fn handle(&self) -> Result<Vec<MembershipPlan>, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        Ok(self.plans.list_plans(&tenant_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::TenantId;

    #[tokio::test]
    async fn gets_plan_in_tenant() {
        let fx = Fixture::new().await;
        let plan = GetPlanHandler::new(fx.tenant.clone(), fx.store.clone())
            .handle(GetPlanQuery { plan_id: fx.quarterly.id })
            .await
            .unwrap();
        assert_eq!(plan.total_duration_months(), 3);
    }

    #[tokio::test]
    async fn foreign_plan_is_not_found() {
        let fx = Fixture::new().await;
        let foreign = MembershipPlan::new(PlanId::new(), TenantId::new(), "Annual", 9000_00, 12, 1).unwrap();
        fx.store.insert_plan(foreign.clone()).await;

        let err = GetPlanHandler::new(fx.tenant.clone(), fx.store.clone())
            .handle(GetPlanQuery { plan_id: foreign.id })
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::plan_not_found(foreign.id));
    }

    #[tokio::test]
    async fn lists_plans_by_name() {
        let fx = Fixture::new().await;
        let names: Vec<String> = ListPlansHandler::new(fx.tenant.clone(), fx.store.clone())
            .handle()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Monthly".to_string(), "Quarterly".to_string()]);
    }
}
