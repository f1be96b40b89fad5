//! PostgreSQL implementation of PaymentLedger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{DateWindow, DomainError, ErrorCode, MemberId, PaymentId, TenantId};
use crate::domain::ledger::{PaymentPosting, PaymentReversal};
use crate::domain::member::Member;
use crate::domain::payment::Payment;
use crate::ports::PaymentLedger;

use super::ledger_store::{
    db_error, insert_audit_event, insert_payment, lock_member, payment_not_found, update_member,
    PostgresLedgerStore,
};
use super::rows::{PaymentRow, PAYMENT_COLUMNS};

// Reversal statements. Every one is scoped by tenant as well as by id.
const FIND_PAYMENT_SQL: &str = "SELECT id FROM payments WHERE id = $1 AND tenant_id = $2";
const LATEST_PAYMENT_SQL: &str =
    "SELECT id FROM payments WHERE member_id = $1 AND tenant_id = $2 ORDER BY sequence DESC LIMIT 1";
const DELETE_PAYMENT_SQL: &str = "DELETE FROM payments WHERE id = $1 AND tenant_id = $2";
const DELETE_MEMBER_SQL: &str = "DELETE FROM members WHERE id = $1 AND tenant_id = $2";

#[async_trait]
impl PaymentLedger for PostgresLedgerStore {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &PaymentId,
    ) -> Result<Option<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE id = $1 AND tenant_id = $2",
            PAYMENT_COLUMNS
        );
        let row: Option<PaymentRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn latest_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Option<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE member_id = $1 AND tenant_id = $2 \
             ORDER BY sequence DESC LIMIT 1",
            PAYMENT_COLUMNS
        );
        let row: Option<PaymentRow> = sqlx::query_as(&sql)
            .bind(member_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find latest payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn list_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Vec<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE member_id = $1 AND tenant_id = $2 \
             ORDER BY sequence ASC",
            PAYMENT_COLUMNS
        );
        let rows: Vec<PaymentRow> = sqlx::query_as(&sql)
            .bind(member_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn list_paid_between(
        &self,
        tenant_id: &TenantId,
        window: &DateWindow,
    ) -> Result<Vec<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE tenant_id = $1 \
             AND payment_date >= $2 AND payment_date <= $3 \
             ORDER BY payment_date ASC, sequence ASC",
            PAYMENT_COLUMNS
        );
        let rows: Vec<PaymentRow> = sqlx::query_as(&sql)
            .bind(tenant_id.as_uuid())
            .bind(window.start())
            .bind(window.end())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list payments in window", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn post(&self, posting: &PaymentPosting) -> Result<Member, DomainError> {
        let member = &posting.member;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        lock_member(&mut tx, &member.tenant_id, &member.id, posting.expected_version).await?;
        insert_payment(&mut tx, &posting.payment).await?;
        let stored = update_member(&mut tx, member, posting.expected_version).await?;
        insert_audit_event(&mut tx, &posting.event).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit payment", e))?;
        Ok(stored)
    }

    async fn reverse(&self, reversal: &PaymentReversal) -> Result<Option<Member>, DomainError> {
        let tenant_id = reversal.tenant_id();
        let member_id = reversal.member_id();
        let payment_id = reversal.payment_id();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let exists: Option<Uuid> = sqlx::query_scalar(FIND_PAYMENT_SQL)
            .bind(payment_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("find payment", e))?;
        if exists.is_none() {
            return Err(payment_not_found(&payment_id));
        }

        lock_member(&mut tx, &tenant_id, &member_id, reversal.expected_version()).await?;

        let latest: Option<Uuid> = sqlx::query_scalar(LATEST_PAYMENT_SQL)
            .bind(member_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("find latest payment", e))?;
        if let Some(latest) = latest.map(PaymentId::from_uuid) {
            if latest != payment_id {
                return Err(DomainError::new(
                    ErrorCode::OrderingViolation,
                    format!("Payment {} is not the latest payment", payment_id),
                )
                .with_detail("payment_id", payment_id.to_string())
                .with_detail("latest_payment_id", latest.to_string()));
            }
        }

        let restored = match reversal {
            PaymentReversal::Restore {
                member,
                expected_version,
                event,
                ..
            } => {
                sqlx::query(DELETE_PAYMENT_SQL)
                    .bind(payment_id.as_uuid())
                    .bind(tenant_id.as_uuid())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("delete payment", e))?;
                let stored = update_member(&mut tx, member, *expected_version).await?;
                insert_audit_event(&mut tx, event).await?;
                Some(stored)
            }
            PaymentReversal::RemoveMember { .. } => {
                // Payments and audit events cascade with the member row.
                sqlx::query(DELETE_MEMBER_SQL)
                    .bind(member_id.as_uuid())
                    .bind(tenant_id.as_uuid())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("delete member", e))?;
                None
            }
        };

        tx.commit()
            .await
            .map_err(|e| db_error("commit payment reversal", e))?;
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_statements_are_tenant_scoped() {
        for sql in [
            FIND_PAYMENT_SQL,
            LATEST_PAYMENT_SQL,
            DELETE_PAYMENT_SQL,
            DELETE_MEMBER_SQL,
        ] {
            assert!(sql.contains("AND tenant_id = $2"), "{sql}");
        }
    }

    #[test]
    fn latest_payment_is_highest_sequence() {
        assert!(LATEST_PAYMENT_SQL.contains("member_id = $1"));
        assert!(LATEST_PAYMENT_SQL.ends_with("ORDER BY sequence DESC LIMIT 1"));
    }
}
