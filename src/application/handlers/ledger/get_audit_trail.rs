//! GetAuditTrailHandler - Query handler for a member's change history.

use std::sync::Arc;

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::MemberId;
use crate::domain::ledger::LedgerError;
use crate::ports::{AuditTrail, TenantContext};

/// Query to get a member's audit trail.
#[derive(Debug, Clone)]
pub struct GetAuditTrailQuery {
    pub member_id: MemberId,
}

/// Handler for reading audit trails.
///
/// Returns events oldest first. A member removed by deletion of its
/// founding payment has an empty trail.
pub struct GetAuditTrailHandler {
    tenant: Arc<dyn TenantContext>,
    audit: Arc<dyn AuditTrail>,
}

impl GetAuditTrailHandler {
    pub fn new(tenant: Arc<dyn TenantContext>, audit: Arc<dyn AuditTrail>) -> Self {
        Self { tenant, audit }
    }

    pub async fn handle(&self, query: GetAuditTrailQuery) -> Result<Vec<AuditEvent>, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        Ok(self.audit.list_for_member(&tenant_id, &query.member_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{date, Fixture};
    use crate::domain::audit::ChangeType;

    #[tokio::test]
    async fn returns_events_oldest_first() {
        let fx = Fixture::new().await;
        let member = fx.enroll_paid("Asha", date(2025, 1, 1)).await;

        let events = GetAuditTrailHandler::new(fx.tenant.clone(), fx.store.clone())
            .handle(GetAuditTrailQuery { member_id: member.id })
            .await
            .unwrap();

        let kinds: Vec<ChangeType> = events.iter().map(|e| e.change_type).collect();
        assert_eq!(kinds, vec![ChangeType::MemberCreated, ChangeType::PaymentCreated]);
        assert!(events.iter().all(|e| e.member_id == member.id));
    }
}
