//! DeactivateMemberHandler - Command handler for deactivating members.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::ledger::LedgerError;
use crate::domain::member::{Member, MemberStatus};
use crate::ports::{MemberRepository, TenantContext};

use super::status_change::change_status;
use super::WritePolicy;

/// Command to deactivate a member.
#[derive(Debug, Clone)]
pub struct DeactivateMemberCommand {
    pub member_id: MemberId,
}

/// Handler for deactivating members.
///
/// Marks an active member inactive. Due dates are untouched; a later payment reactivates the member.
pub struct DeactivateMemberHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
    policy: WritePolicy,
}

impl DeactivateMemberHandler {
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

    pub async fn handle(&self, cmd: DeactivateMemberCommand) -> Result<Member, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        change_status(
            self.members.as_ref(),
            &self.policy,
            tenant_id,
            cmd.member_id,
            MemberStatus::Inactive,
        )
        .await
    }
}
