//! PostgreSQL implementation of AuditTrail.

use async_trait::async_trait;

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::{DomainError, MemberId, TenantId};
use crate::ports::AuditTrail;

use super::ledger_store::{db_error, PostgresLedgerStore};
use super::rows::AuditEventRow;

#[async_trait]
impl AuditTrail for PostgresLedgerStore {
    async fn list_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        let rows: Vec<AuditEventRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, member_id, change_type, old_value, new_value, created_at
            FROM audit_events
            WHERE tenant_id = $1 AND member_id = $2
            ORDER BY position ASC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(member_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list audit events", e))?;

        rows.into_iter().map(AuditEvent::try_from).collect()
    }
}
