//! Shared fixtures for handler tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::{FixedClock, FixedTenantContext, InMemoryLedgerStore};
use crate::domain::foundation::{PlanId, TenantId};
use crate::domain::member::Member;
use crate::domain::payment::PaymentMethod;
use crate::domain::plan::MembershipPlan;

use super::ledger::{EnrollMemberCommand, EnrollMemberHandler, InitialPayment, WritePolicy};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One tenant with a monthly and a quarterly plan, on 2025-03-10.
pub(crate) struct Fixture {
    pub store: Arc<InMemoryLedgerStore>,
    pub tenant_id: TenantId,
    pub tenant: Arc<FixedTenantContext>,
    pub clock: Arc<FixedClock>,
    pub monthly: MembershipPlan,
    pub quarterly: MembershipPlan,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryLedgerStore::new());
        let tenant_id = TenantId::new();
        let monthly = MembershipPlan::new(PlanId::new(), tenant_id, "Monthly", 1000_00, 1, 0).unwrap();
        let quarterly = MembershipPlan::new(PlanId::new(), tenant_id, "Quarterly", 2700_00, 3, 0).unwrap();
        store.insert_plan(monthly.clone()).await;
        store.insert_plan(quarterly.clone()).await;

        Self {
            store,
            tenant_id,
            tenant: Arc::new(FixedTenantContext::new(tenant_id)),
            clock: Arc::new(FixedClock(date(2025, 3, 10))),
            monthly,
            quarterly,
        }
    }

    pub fn enroll_handler(&self) -> EnrollMemberHandler {
        EnrollMemberHandler::new(
            self.tenant.clone(),
            self.store.clone(),
            self.store.clone(),
            WritePolicy::default(),
        )
    }

    /// Enrolls a member who pays the monthly plan on the joining date.
    pub async fn enroll_paid(&self, name: &str, joining_date: NaiveDate) -> Member {
        self.enroll_handler()
            .handle(EnrollMemberCommand {
                full_name: name.to_string(),
                phone: "+91 98450 00000".to_string(),
                joining_date,
                plan_id: Some(self.monthly.id),
                initial_payment: Some(InitialPayment {
                    amount_cents: self.monthly.price_cents,
                    method: PaymentMethod::Cash,
                    payment_date: None,
                }),
            })
            .await
            .unwrap()
            .member
    }
}
