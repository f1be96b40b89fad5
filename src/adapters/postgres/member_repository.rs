//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, TenantId};
use crate::domain::ledger::{Enrollment, StatusChange};
use crate::domain::member::Member;
use crate::ports::MemberRepository;

use super::ledger_store::{
    db_error, insert_audit_event, insert_member, insert_payment, lock_member, update_member,
    PostgresLedgerStore,
};
use super::rows::{MemberRow, MEMBER_COLUMNS};

#[async_trait]
impl MemberRepository for PostgresLedgerStore {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &MemberId,
    ) -> Result<Option<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members WHERE id = $1 AND tenant_id = $2",
            MEMBER_COLUMNS
        );
        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find member", e))?;

        row.map(Member::try_from).transpose()
    }

    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members WHERE tenant_id = $1 ORDER BY full_name ASC, id ASC",
            MEMBER_COLUMNS
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(tenant_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list members", e))?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn enroll(&self, enrollment: &Enrollment) -> Result<Member, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        insert_member(&mut tx, &enrollment.member).await?;
        if let Some(payment) = &enrollment.founding_payment {
            insert_payment(&mut tx, payment).await?;
        }
        for event in &enrollment.events {
            insert_audit_event(&mut tx, event).await?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit enrollment", e))?;

        let mut stored = enrollment.member.clone();
        stored.version = 1;
        Ok(stored)
    }

    async fn apply_status_change(&self, change: &StatusChange) -> Result<Member, DomainError> {
        let member = &change.member;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        lock_member(&mut tx, &member.tenant_id, &member.id, change.expected_version).await?;
        let stored = update_member(&mut tx, member, change.expected_version).await?;
        insert_audit_event(&mut tx, &change.event).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit status change", e))?;
        Ok(stored)
    }
}
