//! PostgreSQL ledger store.
//!
//! One store implements every storage port so a write-set runs inside a
//! single transaction. The member row is locked with `SELECT ... FOR UPDATE`
//! and its `version` compared before anything is written.

use sqlx::{PgConnection, PgPool};

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PaymentId, TenantId};
use crate::domain::member::Member;
use crate::domain::payment::Payment;

/// PostgreSQL implementation of the ledger storage ports.
#[derive(Debug, Clone)]
pub struct PostgresLedgerStore {
    pub(super) pool: PgPool,
}

impl PostgresLedgerStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", context, e))
}

/// Maps unique-constraint violations of a payment insert to ledger errors.
pub(super) fn payment_insert_error(member_id: &MemberId, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("payments_receipt_key") => {
                return DomainError::new(ErrorCode::DuplicateReceipt, "Receipt number is already in use")
                    .with_detail("member_id", member_id.to_string());
            }
            Some("payments_sequence_key") => {
                return DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    "Another payment was recorded for this member",
                )
                .with_detail("member_id", member_id.to_string());
            }
            _ => {}
        }
    }
    db_error("insert payment", e)
}

pub(super) fn member_not_found(id: &MemberId) -> DomainError {
    DomainError::new(ErrorCode::MemberNotFound, format!("Member not found: {}", id))
        .with_detail("id", id.to_string())
}

pub(super) fn payment_not_found(id: &PaymentId) -> DomainError {
    DomainError::new(ErrorCode::PaymentNotFound, format!("Payment not found: {}", id))
        .with_detail("id", id.to_string())
}

/// Locks the member row and checks it is still at `expected` version.
pub(super) async fn lock_member(
    conn: &mut PgConnection,
    tenant_id: &TenantId,
    member_id: &MemberId,
    expected: i64,
) -> Result<(), DomainError> {
    let version: Option<i64> = sqlx::query_scalar(
        "SELECT version FROM members WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
    )
    .bind(member_id.as_uuid())
    .bind(tenant_id.as_uuid())
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| db_error("lock member", e))?;

    match version {
        None => Err(member_not_found(member_id)),
        Some(actual) if actual != expected => Err(DomainError::new(
            ErrorCode::ConcurrencyConflict,
            format!(
                "Member {} is at version {}, expected {}",
                member_id, actual, expected
            ),
        )
        .with_detail("member_id", member_id.to_string())),
        Some(_) => Ok(()),
    }
}

/// Writes the member's mutable columns and bumps its version.
pub(super) async fn update_member(
    conn: &mut PgConnection,
    member: &Member,
    expected: i64,
) -> Result<Member, DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE members SET
            status = $3,
            plan_id = $4,
            plan_amount_cents = $5,
            membership_end_date = $6,
            next_payment_due_date = $7,
            updated_at = $8,
            version = version + 1
        WHERE id = $1 AND tenant_id = $2 AND version = $9
        "#,
    )
    .bind(member.id.as_uuid())
    .bind(member.tenant_id.as_uuid())
    .bind(member.status.as_str())
    .bind(member.plan_id.map(|id| *id.as_uuid()))
    .bind(member.plan_amount_cents)
    .bind(member.membership_end_date())
    .bind(member.next_payment_due_date())
    .bind(member.updated_at.as_datetime())
    .bind(expected)
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("update member", e))?;

    if result.rows_affected() == 0 {
        return Err(member_not_found(&member.id));
    }

    let mut stored = member.clone();
    stored.version = expected + 1;
    Ok(stored)
}

pub(super) async fn insert_member(conn: &mut PgConnection, member: &Member) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO members (
            id, tenant_id, full_name, phone, status, joining_date, plan_id,
            plan_amount_cents, membership_end_date, next_payment_due_date,
            created_at, updated_at, version
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 1)
        "#,
    )
    .bind(member.id.as_uuid())
    .bind(member.tenant_id.as_uuid())
    .bind(&member.full_name)
    .bind(&member.phone)
    .bind(member.status.as_str())
    .bind(member.joining_date)
    .bind(member.plan_id.map(|id| *id.as_uuid()))
    .bind(member.plan_amount_cents)
    .bind(member.membership_end_date())
    .bind(member.next_payment_due_date())
    .bind(member.created_at.as_datetime())
    .bind(member.updated_at.as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.constraint() == Some("members_pkey") {
                return DomainError::validation("member_id", "Member already exists")
                    .with_detail("id", member.id.to_string());
            }
        }
        db_error("insert member", e)
    })?;
    Ok(())
}

pub(super) async fn insert_payment(conn: &mut PgConnection, payment: &Payment) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO payments (
            id, tenant_id, member_id, plan_id, amount_cents, method, payment_date,
            due_date, days_late, is_founding, sequence, receipt_number,
            prior_plan_id, prior_plan_amount_cents, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(payment.id.as_uuid())
    .bind(payment.tenant_id.as_uuid())
    .bind(payment.member_id.as_uuid())
    .bind(payment.plan_id.as_uuid())
    .bind(payment.amount_cents)
    .bind(payment.method.as_str())
    .bind(payment.payment_date)
    .bind(payment.due_date)
    .bind(i32::try_from(payment.days_late).unwrap_or(i32::MAX))
    .bind(payment.is_founding)
    .bind(payment.sequence)
    .bind(payment.receipt_number.as_str())
    .bind(payment.prior.plan_id.map(|id| *id.as_uuid()))
    .bind(payment.prior.plan_amount_cents)
    .bind(payment.created_at.as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| payment_insert_error(&payment.member_id, e))?;
    Ok(())
}

pub(super) async fn insert_audit_event(
    conn: &mut PgConnection,
    event: &AuditEvent,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO audit_events (
            id, tenant_id, member_id, change_type, old_value, new_value, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(event.id.as_uuid())
    .bind(event.tenant_id.as_uuid())
    .bind(event.member_id.as_uuid())
    .bind(event.change_type.as_str())
    .bind(&event.old_value)
    .bind(&event.new_value)
    .bind(event.created_at.as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("append audit event", e))?;
    Ok(())
}
