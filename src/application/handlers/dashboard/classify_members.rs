//! ClassifyMembersHandler - Query handler for due-status buckets.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::dashboard::{classify, DueBuckets, DueCounts};
use crate::domain::foundation::DateWindow;
use crate::domain::ledger::LedgerError;
use crate::domain::member::Member;
use crate::ports::{Clock, MemberRepository, PaymentLedger, TenantContext};

/// Query to classify the caller's members.
#[derive(Debug, Clone, Default)]
pub struct ClassifyMembersQuery {
    /// Defaults to today.
    pub reference_date: Option<NaiveDate>,

    /// Defaults to the month containing the reference date.
    pub window: Option<DateWindow>,

    /// Inactive members are left out unless set.
    pub include_inactive: bool,
}

/// Due-status buckets with the parameters they were computed for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyMembersResult {
    pub reference_date: NaiveDate,
    pub window: DateWindow,
    pub counts: DueCounts,
    pub buckets: DueBuckets,
}

/// Handler for the dashboard's due-status view.
pub struct ClassifyMembersHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentLedger>,
    clock: Arc<dyn Clock>,
}

impl ClassifyMembersHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        members: Arc<dyn MemberRepository>,
        payments: Arc<dyn PaymentLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tenant,
            members,
            payments,
            clock,
        }
    }

    pub async fn handle(&self, query: ClassifyMembersQuery) -> Result<ClassifyMembersResult, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        let reference_date = query.reference_date.unwrap_or_else(|| self.clock.today());
        let window = query
            .window
            .unwrap_or_else(|| DateWindow::month_of(reference_date));

        let members: Vec<Member> = self
            .members
            .list_by_tenant(&tenant_id)
            .await?
            .into_iter()
            .filter(|m| query.include_inactive || m.status.is_active())
            .collect();
        let payments = self.payments.list_paid_between(&tenant_id, &window).await?;

        let buckets = classify(&members, &payments, reference_date, &window);
        tracing::debug!(
            tenant_id = %tenant_id,
            reference_date = %reference_date,
            members = buckets.len(),
            "classified members"
        );

        Ok(ClassifyMembersResult {
            reference_date,
            window,
            counts: buckets.counts(),
            buckets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::ledger::{
        DeactivateMemberCommand, DeactivateMemberHandler, WritePolicy,
    };
    use crate::application::handlers::test_support::{date, Fixture};

    fn handler(fx: &Fixture) -> ClassifyMembersHandler {
        ClassifyMembersHandler::new(
            fx.tenant.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
        )
    }

    #[tokio::test]
    async fn buckets_members_for_current_month() {
        let fx = Fixture::new().await;
        // Joined 2025-02-10, paid then: due 2025-03-10, which is today.
        let due_today = fx.enroll_paid("Asha", date(2025, 2, 10)).await;
        // Joined 2025-02-11: due tomorrow.
        let due_tomorrow = fx.enroll_paid("Bala", date(2025, 2, 11)).await;
        // Joined 2025-02-03: overdue since 2025-03-03.
        let overdue = fx.enroll_paid("Chitra", date(2025, 2, 3)).await;
        // Joined 2025-03-02, paid in March: paid.
        let paid = fx.enroll_paid("Dev", date(2025, 3, 2)).await;

        let result = handler(&fx).handle(ClassifyMembersQuery::default()).await.unwrap();

        assert_eq!(result.reference_date, date(2025, 3, 10));
        assert_eq!(result.window, DateWindow::month(2025, 3).unwrap());
        assert_eq!(result.buckets.due_today[0].member_id, due_today.id);
        assert_eq!(result.buckets.due_tomorrow[0].member_id, due_tomorrow.id);
        assert_eq!(result.buckets.overdue[0].member_id, overdue.id);
        assert_eq!(result.buckets.paid[0].member_id, paid.id);
        assert_eq!(result.counts.upcoming, 0);
        assert_eq!(result.buckets.len(), 4);
    }

    #[tokio::test]
    async fn inactive_members_are_excluded_by_default() {
        let fx = Fixture::new().await;
        let member = fx.enroll_paid("Asha", date(2025, 2, 10)).await;
        DeactivateMemberHandler::new(fx.tenant.clone(), fx.store.clone(), WritePolicy::default())
            .handle(DeactivateMemberCommand { member_id: member.id })
            .await
            .unwrap();

        let result = handler(&fx).handle(ClassifyMembersQuery::default()).await.unwrap();
        assert!(result.buckets.is_empty());

        let result = handler(&fx)
            .handle(ClassifyMembersQuery {
                include_inactive: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.counts.due_today, 1);
    }

    #[tokio::test]
    async fn explicit_window_changes_overdue() {
        let fx = Fixture::new().await;
        fx.enroll_paid("Asha", date(2025, 1, 20)).await;

        let february = DateWindow::month(2025, 2).unwrap();
        let result = handler(&fx)
            .handle(ClassifyMembersQuery {
                window: Some(february),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.counts.overdue, 1);

        let result = handler(&fx).handle(ClassifyMembersQuery::default()).await.unwrap();
        assert_eq!(result.counts.unscheduled, 1);
    }
}
