//! PostgreSQL implementation of PlanCatalog.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId, TenantId};
use crate::domain::plan::MembershipPlan;
use crate::ports::PlanCatalog;

use super::ledger_store::{db_error, PostgresLedgerStore};
use super::rows::PlanRow;

#[async_trait]
impl PlanCatalog for PostgresLedgerStore {
    async fn find_plan(
        &self,
        tenant_id: &TenantId,
        id: &PlanId,
    ) -> Result<Option<MembershipPlan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, price_cents, base_duration_months, bonus_duration_months
            FROM membership_plans
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find plan", e))?;

        row.map(MembershipPlan::try_from).transpose()
    }

    async fn list_plans(&self, tenant_id: &TenantId) -> Result<Vec<MembershipPlan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, price_cents, base_duration_months, bonus_duration_months
            FROM membership_plans
            WHERE tenant_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list plans", e))?;

        rows.into_iter().map(MembershipPlan::try_from).collect()
    }
}
