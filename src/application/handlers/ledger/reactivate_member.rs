//! ReactivateMemberHandler - Command handler for reactivating members.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::ledger::LedgerError;
use crate::domain::member::{Member, MemberStatus};
use crate::ports::{MemberRepository, TenantContext};

use super::status_change::change_status;
use super::WritePolicy;

/// Command to reactivate a member.
#[derive(Debug, Clone)]
pub struct ReactivateMemberCommand {
    pub member_id: MemberId,
}

/// Handler for reactivating members.
///
/// Marks an inactive member active again without touching its due dates.
pub struct ReactivateMemberHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
    policy: WritePolicy,
}

impl ReactivateMemberHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        members: Arc<dyn MemberRepository>,
        policy: WritePolicy,
    ) -> Self {
        Self {
            tenant,
            members,
            policy,
        }
    }

    pub async fn handle(&self, cmd: ReactivateMemberCommand) -> Result<Member, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        change_status(
            self.members.as_ref(),
            &self.policy,
            tenant_id,
            cmd.member_id,
            MemberStatus::Active,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::ledger::{DeactivateMemberCommand, DeactivateMemberHandler};
    use crate::application::handlers::test_support::{date, Fixture};
    use crate::domain::audit::ChangeType;
    use crate::ports::AuditTrail;

    #[tokio::test]
    async fn reactivates_inactive_member() {
        let fx = Fixture::new().await;
        let member = fx.enroll_paid("Asha", date(2025, 1, 1)).await;
        DeactivateMemberHandler::new(fx.tenant.clone(), fx.store.clone(), WritePolicy::default())
            .handle(DeactivateMemberCommand { member_id: member.id })
            .await
            .unwrap();

        let after = ReactivateMemberHandler::new(fx.tenant.clone(), fx.store.clone(), WritePolicy::default())
            .handle(ReactivateMemberCommand { member_id: member.id })
            .await
            .unwrap();

        assert_eq!(after.status, MemberStatus::Active);
        assert_eq!(after.next_payment_due_date(), Some(date(2025, 2, 1)));
        let kinds: Vec<ChangeType> = AuditTrail::list_for_member(fx.store.as_ref(), &fx.tenant_id, &member.id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.change_type)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ChangeType::MemberCreated,
                ChangeType::PaymentCreated,
                ChangeType::StatusChangedToInactive,
                ChangeType::MemberReactivated,
            ]
        );
    }

    #[tokio::test]
    async fn reactivating_active_member_is_rejected() {
        let fx = Fixture::new().await;
        let member = fx.enroll_paid("Asha", date(2025, 1, 1)).await;

        let err = ReactivateMemberHandler::new(fx.tenant.clone(), fx.store.clone(), WritePolicy::default())
            .handle(ReactivateMemberCommand { member_id: member.id })
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::invalid_state("active", "reactivate"));
        assert_eq!(fx.store.audit_count().await, 2);
    }
}
