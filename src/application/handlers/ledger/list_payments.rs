//! ListPaymentsHandler - Query handler for a member's payment history.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::ledger::LedgerError;
use crate::domain::payment::Payment;
use crate::ports::{MemberRepository, PaymentLedger, TenantContext};

/// Query to list a member's payments.
#[derive(Debug, Clone)]
pub struct ListPaymentsQuery {
    pub member_id: MemberId,
}

/// Handler for listing payments in creation order.
///
/// The last entry is the only one that may be deleted.
pub struct ListPaymentsHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentLedger>,
}

impl ListPaymentsHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        members: Arc<dyn MemberRepository>,
        payments: Arc<dyn PaymentLedger>,
    ) -> Self {
        Self {
            tenant,
            members,
            payments,
        }
    }

    pub async fn handle(&self, query: ListPaymentsQuery) -> Result<Vec<Payment>, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        if self.members.find_by_id(&tenant_id, &query.member_id).await?.is_none() {
            return Err(LedgerError::member_not_found(query.member_id));
        }

        let payments = self.payments.list_for_member(&tenant_id, &query.member_id).await?;
        tracing::debug!(
            tenant_id = %tenant_id,
            member_id = %query.member_id,
            count = payments.len(),
            "listed payments"
        );
        Ok(payments)
    }
}
