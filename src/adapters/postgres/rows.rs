//! Row types and column conversions shared by the ledger tables.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::audit::{AuditEvent, ChangeType};
use crate::domain::foundation::{
    AuditEventId, DomainError, ErrorCode, MemberId, PaymentId, PlanId, TenantId, Timestamp,
};
use crate::domain::member::{BillingSnapshot, Member, MemberStatus};
use crate::domain::payment::{Payment, PaymentMethod, ReceiptNumber};
use crate::domain::plan::MembershipPlan;
use crate::domain::schedule::DueWindow;

pub(super) const MEMBER_COLUMNS: &str = "id, tenant_id, full_name, phone, status, joining_date, \
     plan_id, plan_amount_cents, membership_end_date, next_payment_due_date, \
     created_at, updated_at, version";

pub(super) const PAYMENT_COLUMNS: &str = "id, tenant_id, member_id, plan_id, amount_cents, method, \
     payment_date, due_date, days_late, is_founding, sequence, receipt_number, \
     prior_plan_id, prior_plan_amount_cents, created_at";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PlanRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    price_cents: i64,
    base_duration_months: i32,
    bonus_duration_months: i32,
}

impl TryFrom<PlanRow> for MembershipPlan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        MembershipPlan::new(
            PlanId::from_uuid(row.id),
            TenantId::from_uuid(row.tenant_id),
            row.name,
            row.price_cents,
            to_months(row.base_duration_months)?,
            to_months(row.bonus_duration_months)?,
        )
        .map_err(|e| corrupt(format!("Invalid plan row: {}", e)))
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    id: Uuid,
    tenant_id: Uuid,
    full_name: String,
    phone: String,
    status: String,
    joining_date: NaiveDate,
    plan_id: Option<Uuid>,
    plan_amount_cents: i64,
    membership_end_date: Option<NaiveDate>,
    next_payment_due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let schedule = match (row.membership_end_date, row.next_payment_due_date) {
            (Some(membership_end_date), Some(next_payment_due_date)) => Some(DueWindow {
                membership_end_date,
                next_payment_due_date,
            }),
            (None, None) => None,
            _ => return Err(corrupt(format!("Member {} has half a schedule", row.id))),
        };

        Ok(Member {
            id: MemberId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            full_name: row.full_name,
            phone: row.phone,
            status: parse_status(&row.status)?,
            joining_date: row.joining_date,
            plan_id: row.plan_id.map(PlanId::from_uuid),
            plan_amount_cents: row.plan_amount_cents,
            schedule,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            version: row.version,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PaymentRow {
    id: Uuid,
    tenant_id: Uuid,
    member_id: Uuid,
    plan_id: Uuid,
    amount_cents: i64,
    method: String,
    payment_date: NaiveDate,
    due_date: NaiveDate,
    days_late: i32,
    is_founding: bool,
    sequence: i64,
    receipt_number: String,
    prior_plan_id: Option<Uuid>,
    prior_plan_amount_cents: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let method: PaymentMethod = row
            .method
            .parse()
            .map_err(|e| corrupt(format!("Invalid payment method: {}", e)))?;
        let receipt_number = ReceiptNumber::new(row.receipt_number)
            .map_err(|e| corrupt(format!("Invalid receipt number: {}", e)))?;
        let days_late = u32::try_from(row.days_late)
            .map_err(|_| corrupt(format!("Invalid days_late value: {}", row.days_late)))?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            member_id: MemberId::from_uuid(row.member_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            amount_cents: row.amount_cents,
            method,
            payment_date: row.payment_date,
            due_date: row.due_date,
            days_late,
            is_founding: row.is_founding,
            sequence: row.sequence,
            receipt_number,
            prior: BillingSnapshot {
                plan_id: row.prior_plan_id.map(PlanId::from_uuid),
                plan_amount_cents: row.prior_plan_amount_cents,
            },
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct AuditEventRow {
    id: Uuid,
    tenant_id: Uuid,
    member_id: Uuid,
    change_type: String,
    old_value: Option<Value>,
    new_value: Option<Value>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = DomainError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        Ok(AuditEvent {
            id: AuditEventId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            member_id: MemberId::from_uuid(row.member_id),
            change_type: parse_change_type(&row.change_type)?,
            old_value: row.old_value,
            new_value: row.new_value,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn corrupt(message: String) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, message)
}

fn to_months(value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| corrupt(format!("Invalid duration value: {}", value)))
}

pub(super) fn parse_status(s: &str) -> Result<MemberStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "active" => Ok(MemberStatus::Active),
        "inactive" => Ok(MemberStatus::Inactive),
        _ => Err(corrupt(format!("Invalid status value: {}", s))),
    }
}

pub(super) fn parse_change_type(s: &str) -> Result<ChangeType, DomainError> {
    match s {
        "member_created" => Ok(ChangeType::MemberCreated),
        "payment_created" => Ok(ChangeType::PaymentCreated),
        "payment_deleted" => Ok(ChangeType::PaymentDeleted),
        "status_changed_to_inactive" => Ok(ChangeType::StatusChangedToInactive),
        "member_reactivated" => Ok(ChangeType::MemberReactivated),
        _ => Err(corrupt(format!("Invalid change type value: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_works_for_all_values() {
        assert_eq!(parse_status("active").unwrap(), MemberStatus::Active);
        assert_eq!(parse_status("INACTIVE").unwrap(), MemberStatus::Inactive);
        assert!(parse_status("suspended").is_err());
    }

    #[test]
    fn change_types_round_trip_through_column_text() {
        for change in [
            ChangeType::MemberCreated,
            ChangeType::PaymentCreated,
            ChangeType::PaymentDeleted,
            ChangeType::StatusChangedToInactive,
            ChangeType::MemberReactivated,
        ] {
            assert_eq!(parse_change_type(change.as_str()).unwrap(), change);
        }
        assert!(parse_change_type("").is_err());
    }

    #[test]
    fn half_a_schedule_is_rejected() {
        let now = Utc::now();
        let row = MemberRow {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            full_name: "Asha".to_string(),
            phone: "555".to_string(),
            status: "active".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            plan_id: None,
            plan_amount_cents: 0,
            membership_end_date: None,
            next_payment_due_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            created_at: now,
            updated_at: now,
            version: 1,
        };
        let err = Member::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn negative_days_late_is_rejected() {
        let row = PaymentRow {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            amount_cents: 100,
            method: "cash".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            days_late: -1,
            is_founding: true,
            sequence: 1,
            receipt_number: "RCP-20250101-0000000A".to_string(),
            prior_plan_id: None,
            prior_plan_amount_cents: 0,
            created_at: Utc::now(),
        };
        assert!(Payment::try_from(row).is_err());
    }
}
