//! Shared write path for deactivation and reactivation.

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::{MemberId, TenantId};
use crate::domain::ledger::{LedgerError, StatusChange};
use crate::domain::member::{Member, MemberStatus};
use crate::ports::MemberRepository;

use super::WritePolicy;

/// Moves a member to `target`, retrying version conflicts.
pub(super) async fn change_status(
    members: &dyn MemberRepository,
    policy: &WritePolicy,
    tenant_id: TenantId,
    member_id: MemberId,
    target: MemberStatus,
) -> Result<Member, LedgerError> {
    let operation = match target {
        MemberStatus::Active => "reactivate_member",
        MemberStatus::Inactive => "deactivate_member",
    };

    let member = policy
        .run(operation, move |_| async move {
            let current = members
                .find_by_id(&tenant_id, &member_id)
                .await?
                .ok_or_else(|| LedgerError::member_not_found(member_id))?;

            let mut next = current.clone();
            let event = match target {
                MemberStatus::Inactive => {
                    next.deactivate()?;
                    AuditEvent::deactivated(&next)
                }
                MemberStatus::Active => {
                    next.reactivate()?;
                    AuditEvent::reactivated(&next)
                }
            };

            let change = StatusChange {
                member: next,
                expected_version: current.version,
                event,
            };
            Ok::<_, LedgerError>(members.apply_status_change(&change).await?)
        })
        .await?;

    tracing::info!(
        tenant_id = %tenant_id,
        member_id = %member_id,
        status = %member.status,
        "member status changed"
    );
    Ok(member)
}
