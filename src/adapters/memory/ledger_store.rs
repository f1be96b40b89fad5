//! In-Memory Ledger Store Adapter
//!
//! Holds plans, members, payments and audit events behind one `RwLock`.
//! Every write-set is validated completely before anything is mutated, so a
//! rejected write leaves the store untouched.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::{
    DateWindow, DomainError, ErrorCode, MemberId, PaymentId, PlanId, TenantId,
};
use crate::domain::ledger::{Enrollment, PaymentPosting, PaymentReversal, StatusChange};
use crate::domain::member::Member;
use crate::domain::payment::{Payment, ReceiptNumber};
use crate::domain::plan::MembershipPlan;
use crate::ports::{AuditTrail, MemberRepository, PaymentLedger, PlanCatalog};

#[derive(Debug, Default)]
struct LedgerState {
    plans: HashMap<PlanId, MembershipPlan>,
    members: HashMap<MemberId, Member>,
    payments: HashMap<PaymentId, Payment>,
    audit: Vec<AuditEvent>,
}

impl LedgerState {
    fn member(&self, tenant_id: &TenantId, id: &MemberId) -> Option<&Member> {
        self.members.get(id).filter(|m| m.tenant_id == *tenant_id)
    }

    fn payment(&self, tenant_id: &TenantId, id: &PaymentId) -> Option<&Payment> {
        self.payments.get(id).filter(|p| p.tenant_id == *tenant_id)
    }

    fn latest_payment(&self, tenant_id: &TenantId, member_id: &MemberId) -> Option<&Payment> {
        self.payments
            .values()
            .filter(|p| p.tenant_id == *tenant_id && p.member_id == *member_id)
            .max_by_key(|p| p.sequence)
    }

    fn receipt_taken(&self, tenant_id: &TenantId, receipt: &ReceiptNumber) -> bool {
        self.payments
            .values()
            .any(|p| p.tenant_id == *tenant_id && p.receipt_number == *receipt)
    }

    /// Current version of a member, or the matching error.
    fn check_version(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
        expected: i64,
    ) -> Result<(), DomainError> {
        let member = self
            .member(tenant_id, member_id)
            .ok_or_else(|| member_not_found(member_id))?;
        if member.version != expected {
            return Err(conflict(member_id, expected, member.version));
        }
        Ok(())
    }

    fn store_member(&mut self, member: &Member, version: i64) -> Member {
        let mut stored = member.clone();
        stored.version = version;
        self.members.insert(stored.id, stored.clone());
        stored
    }
}

fn member_not_found(id: &MemberId) -> DomainError {
    DomainError::new(ErrorCode::MemberNotFound, format!("Member not found: {}", id))
        .with_detail("id", id.to_string())
}

fn payment_not_found(id: &PaymentId) -> DomainError {
    DomainError::new(ErrorCode::PaymentNotFound, format!("Payment not found: {}", id))
        .with_detail("id", id.to_string())
}

fn conflict(member_id: &MemberId, expected: i64, actual: i64) -> DomainError {
    DomainError::new(
        ErrorCode::ConcurrencyConflict,
        format!(
            "Member {} is at version {}, expected {}",
            member_id, actual, expected
        ),
    )
    .with_detail("member_id", member_id.to_string())
}

fn duplicate_receipt(member_id: &MemberId, receipt: &ReceiptNumber) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateReceipt,
        format!("Receipt number {} is already in use", receipt),
    )
    .with_detail("member_id", member_id.to_string())
}

/// In-memory implementation of all ledger storage ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a plan in the catalog.
    pub async fn insert_plan(&self, plan: MembershipPlan) {
        self.state.write().await.plans.insert(plan.id, plan);
    }

    /// Get the number of stored members across all tenants.
    pub async fn member_count(&self) -> usize {
        self.state.read().await.members.len()
    }

    /// Get the number of stored payments across all tenants.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// Get the number of stored audit events across all tenants.
    pub async fn audit_count(&self) -> usize {
        self.state.read().await.audit.len()
    }
}

#[async_trait]
impl PlanCatalog for InMemoryLedgerStore {
    async fn find_plan(
        &self,
        tenant_id: &TenantId,
        id: &PlanId,
    ) -> Result<Option<MembershipPlan>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .plans
            .get(id)
            .filter(|p| p.tenant_id == *tenant_id)
            .cloned())
    }

    async fn list_plans(&self, tenant_id: &TenantId) -> Result<Vec<MembershipPlan>, DomainError> {
        let state = self.state.read().await;
        let mut plans: Vec<MembershipPlan> = state
            .plans
            .values()
            .filter(|p| p.tenant_id == *tenant_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(plans)
    }
}

#[async_trait]
impl MemberRepository for InMemoryLedgerStore {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &MemberId,
    ) -> Result<Option<Member>, DomainError> {
        Ok(self.state.read().await.member(tenant_id, id).cloned())
    }

    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Member>, DomainError> {
        let state = self.state.read().await;
        let mut members: Vec<Member> = state
            .members
            .values()
            .filter(|m| m.tenant_id == *tenant_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(members)
    }

    async fn enroll(&self, enrollment: &Enrollment) -> Result<Member, DomainError> {
        let mut state = self.state.write().await;
        let member = &enrollment.member;

        if state.members.contains_key(&member.id) {
            return Err(DomainError::validation("member_id", "Member already exists")
                .with_detail("id", member.id.to_string()));
        }
        if let Some(payment) = &enrollment.founding_payment {
            if state.receipt_taken(&payment.tenant_id, &payment.receipt_number) {
                return Err(duplicate_receipt(&member.id, &payment.receipt_number));
            }
        }

        let stored = state.store_member(member, 1);
        if let Some(payment) = &enrollment.founding_payment {
            state.payments.insert(payment.id, payment.clone());
        }
        state.audit.extend(enrollment.events.iter().cloned());
        Ok(stored)
    }

    async fn apply_status_change(&self, change: &StatusChange) -> Result<Member, DomainError> {
        let mut state = self.state.write().await;
        let member = &change.member;
        state.check_version(&member.tenant_id, &member.id, change.expected_version)?;

        let stored = state.store_member(member, change.expected_version + 1);
        state.audit.push(change.event.clone());
        Ok(stored)
    }
}

#[async_trait]
impl PaymentLedger for InMemoryLedgerStore {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &PaymentId,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self.state.read().await.payment(tenant_id, id).cloned())
    }

    async fn latest_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .latest_payment(tenant_id, member_id)
            .cloned())
    }

    async fn list_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Vec<Payment>, DomainError> {
        let state = self.state.read().await;
        let mut payments: Vec<Payment> = state
            .payments
            .values()
            .filter(|p| p.tenant_id == *tenant_id && p.member_id == *member_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.sequence);
        Ok(payments)
    }

    async fn list_paid_between(
        &self,
        tenant_id: &TenantId,
        window: &DateWindow,
    ) -> Result<Vec<Payment>, DomainError> {
        let state = self.state.read().await;
        let mut payments: Vec<Payment> = state
            .payments
            .values()
            .filter(|p| p.tenant_id == *tenant_id && window.contains(p.payment_date))
            .cloned()
            .collect();
        payments.sort_by(|a, b| {
            a.payment_date
                .cmp(&b.payment_date)
                .then(a.sequence.cmp(&b.sequence))
        });
        Ok(payments)
    }

    async fn post(&self, posting: &PaymentPosting) -> Result<Member, DomainError> {
        let mut state = self.state.write().await;
        let member = &posting.member;
        let payment = &posting.payment;
        state.check_version(&member.tenant_id, &member.id, posting.expected_version)?;

        let next_sequence = state
            .latest_payment(&member.tenant_id, &member.id)
            .map_or(1, |p| p.sequence + 1);
        if payment.sequence != next_sequence {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!(
                    "Payment sequence {} is taken, next is {}",
                    payment.sequence, next_sequence
                ),
            )
            .with_detail("member_id", member.id.to_string()));
        }
        if state.receipt_taken(&payment.tenant_id, &payment.receipt_number) {
            return Err(duplicate_receipt(&member.id, &payment.receipt_number));
        }

        let stored = state.store_member(member, posting.expected_version + 1);
        state.payments.insert(payment.id, payment.clone());
        state.audit.push(posting.event.clone());
        Ok(stored)
    }

    async fn reverse(&self, reversal: &PaymentReversal) -> Result<Option<Member>, DomainError> {
        let mut state = self.state.write().await;
        let tenant_id = reversal.tenant_id();
        let member_id = reversal.member_id();
        let payment_id = reversal.payment_id();

        if state.payment(&tenant_id, &payment_id).is_none() {
            return Err(payment_not_found(&payment_id));
        }
        state.check_version(&tenant_id, &member_id, reversal.expected_version())?;
        if let Some(latest) = state.latest_payment(&tenant_id, &member_id) {
            if latest.id != payment_id {
                return Err(DomainError::new(
                    ErrorCode::OrderingViolation,
                    format!("Payment {} is not the latest payment", payment_id),
                )
                .with_detail("payment_id", payment_id.to_string())
                .with_detail("latest_payment_id", latest.id.to_string()));
            }
        }

        match reversal {
            PaymentReversal::Restore {
                member,
                expected_version,
                event,
                ..
            } => {
                state.payments.remove(&payment_id);
                let stored = state.store_member(member, expected_version + 1);
                state.audit.push(event.clone());
                Ok(Some(stored))
            }
            PaymentReversal::RemoveMember { .. } => {
                state.payments.retain(|_, p| p.member_id != member_id);
                state.audit.retain(|e| e.member_id != member_id);
                state.members.remove(&member_id);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl AuditTrail for InMemoryLedgerStore {
    async fn list_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .audit
            .iter()
            .filter(|e| e.tenant_id == *tenant_id && e.member_id == *member_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::ChangeType;
    use crate::domain::ledger::{build_enrollment, build_posting, build_reversal, PaymentDetails};
    use crate::domain::payment::PaymentMethod;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(tenant_id: TenantId) -> MembershipPlan {
        MembershipPlan::new(PlanId::new(), tenant_id, "Monthly", 1000_00, 1, 0).unwrap()
    }

    fn details(paid_on: NaiveDate) -> PaymentDetails {
        PaymentDetails {
            amount_cents: 1000_00,
            method: PaymentMethod::Cash,
            payment_date: paid_on,
        }
    }

    fn receipt(n: u32) -> ReceiptNumber {
        ReceiptNumber::new(format!("RCP-20250101-{:08X}", n)).unwrap()
    }

    async fn enrolled(store: &InMemoryLedgerStore, tenant: TenantId, plan: &MembershipPlan) -> Member {
        let member = Member::enroll(MemberId::new(), tenant, "Asha", "555", date(2025, 1, 1)).unwrap();
        let enrollment =
            build_enrollment(member, Some(plan), Some(&details(date(2025, 1, 1))), receipt(1)).unwrap();
        store.enroll(&enrollment).await.unwrap()
    }

    #[tokio::test]
    async fn enroll_writes_member_payment_and_events() {
        let store = InMemoryLedgerStore::new();
        let tenant = TenantId::new();
        let monthly = plan(tenant);
        let member = enrolled(&store, tenant, &monthly).await;

        assert_eq!(member.version, 1);
        assert_eq!(store.payment_count().await, 1);
        let events = AuditTrail::list_for_member(&store, &tenant, &member.id).await.unwrap();
        let kinds: Vec<ChangeType> = events.iter().map(|e| e.change_type).collect();
        assert_eq!(kinds, vec![ChangeType::MemberCreated, ChangeType::PaymentCreated]);
    }

    #[tokio::test]
    async fn stale_version_is_rejected_without_writing() {
        let store = InMemoryLedgerStore::new();
        let tenant = TenantId::new();
        let monthly = plan(tenant);
        let member = enrolled(&store, tenant, &monthly).await;

        let mut stale = member.clone();
        stale.version = 0;
        let posting = build_posting(&stale, &monthly, &details(date(2025, 2, 1)), Some(1), receipt(2)).unwrap();

        let err = store.post(&posting).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        assert_eq!(err.detail("member_id"), Some(member.id.to_string().as_str()));
        assert_eq!(store.payment_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_receipt_is_rejected() {
        let store = InMemoryLedgerStore::new();
        let tenant = TenantId::new();
        let monthly = plan(tenant);
        let member = enrolled(&store, tenant, &monthly).await;

        let posting = build_posting(&member, &monthly, &details(date(2025, 2, 1)), Some(1), receipt(1)).unwrap();
        let err = store.post(&posting).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateReceipt);
    }

    #[tokio::test]
    async fn other_tenants_cannot_see_rows() {
        let store = InMemoryLedgerStore::new();
        let tenant = TenantId::new();
        let monthly = plan(tenant);
        store.insert_plan(monthly.clone()).await;
        let member = enrolled(&store, tenant, &monthly).await;

        let stranger = TenantId::new();
        assert!(MemberRepository::find_by_id(&store, &stranger, &member.id).await.unwrap().is_none());
        assert!(store.find_plan(&stranger, &monthly.id).await.unwrap().is_none());
        assert!(PaymentLedger::list_for_member(&store, &stranger, &member.id).await.unwrap().is_empty());
        assert!(AuditTrail::list_for_member(&store, &stranger, &member.id).await.unwrap().is_empty());
        assert!(!AuditTrail::list_for_member(&store, &tenant, &member.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_founding_payment_cascades() {
        let store = InMemoryLedgerStore::new();
        let tenant = TenantId::new();
        let monthly = plan(tenant);
        let member = enrolled(&store, tenant, &monthly).await;
        let founding = store.latest_for_member(&tenant, &member.id).await.unwrap().unwrap();

        let reversal = build_reversal(&member, &founding, &founding).unwrap();
        let restored = store.reverse(&reversal).await.unwrap();

        assert!(restored.is_none());
        assert_eq!(store.member_count().await, 0);
        assert_eq!(store.payment_count().await, 0);
        assert_eq!(store.audit_count().await, 0);
    }

    #[tokio::test]
    async fn reversing_a_superseded_payment_is_an_ordering_violation() {
        let store = InMemoryLedgerStore::new();
        let tenant = TenantId::new();
        let monthly = plan(tenant);
        let member = enrolled(&store, tenant, &monthly).await;
        let founding = store.latest_for_member(&tenant, &member.id).await.unwrap().unwrap();

        // Reversal computed before a second payment lands.
        let reversal = build_reversal(&member, &founding, &founding).unwrap();
        let posting = build_posting(&member, &monthly, &details(date(2025, 2, 1)), Some(1), receipt(2)).unwrap();
        let after = store.post(&posting).await.unwrap();
        assert_eq!(after.version, 2);

        let err = store.reverse(&reversal).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        assert_eq!(store.payment_count().await, 2);
    }
}
