//! GetMemberHandler - Query handler for a single member.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::ledger::LedgerError;
use crate::domain::member::Member;
use crate::ports::{MemberRepository, TenantContext};

/// Query to get a member.
#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub member_id: MemberId,
}

/// Handler for retrieving a member within the caller's tenant.
pub struct GetMemberHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
}

impl GetMemberHandler {
    pub fn new(tenant: Arc<dyn TenantContext>, members: Arc<dyn MemberRepository>) -> Self {
        Self { tenant, members }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<Member, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        tracing::debug!(tenant_id = %tenant_id, member_id = %query.member_id, "loading member");

        self.members
            .find_by_id(&tenant_id, &query.member_id)
            .await?
            .ok_or_else(|| LedgerError::member_not_found(query.member_id))
    }
}
