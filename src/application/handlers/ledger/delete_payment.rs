//! DeletePaymentHandler - Command handler for reversing a member's latest payment.

use std::sync::Arc;

use crate::domain::foundation::{PaymentId, TenantId};
use crate::domain::ledger::{build_reversal, LedgerError, ReversalOutcome};
use crate::ports::{MemberRepository, PaymentLedger, TenantContext};

use super::WritePolicy;

/// Command to delete a payment.
#[derive(Debug, Clone)]
pub struct DeletePaymentCommand {
    pub payment_id: PaymentId,
}

/// Result of a deleted payment.
#[derive(Debug, Clone)]
pub struct DeletePaymentResult {
    pub payment_id: PaymentId,
    pub outcome: ReversalOutcome,
}

impl DeletePaymentResult {
    /// Returns true if the founding payment was deleted along with its member.
    pub fn member_deleted(&self) -> bool {
        self.outcome.member_deleted()
    }
}

/// Handler for deleting payments.
///
/// Only a member's most recent payment can be deleted. Deleting it restores
/// the schedule and billing fields the member had before that payment;
/// deleting the founding payment removes the member and its audit trail.
pub struct DeletePaymentHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentLedger>,
    policy: WritePolicy,
}

impl DeletePaymentHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        members: Arc<dyn MemberRepository>,
        payments: Arc<dyn PaymentLedger>,
        policy: WritePolicy,
    ) -> Self {
        Self {
            tenant,
            members,
            payments,
            policy,
        }
    }

    pub async fn handle(&self, cmd: DeletePaymentCommand) -> Result<DeletePaymentResult, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        let payment_id = cmd.payment_id;

        let outcome = self
            .policy
            .run("delete_payment", move |_| async move {
                self.attempt(tenant_id, payment_id).await
            })
            .await?;

        match &outcome {
            ReversalOutcome::DueDateReverted { member } => tracing::info!(
                tenant_id = %tenant_id,
                member_id = %member.id,
                payment_id = %payment_id,
                "payment deleted, due date reverted"
            ),
            ReversalOutcome::MemberRemoved { member_id } => tracing::info!(
                tenant_id = %tenant_id,
                member_id = %member_id,
                payment_id = %payment_id,
                "founding payment deleted, member removed"
            ),
        }

        Ok(DeletePaymentResult {
            payment_id,
            outcome,
        })
    }

    async fn attempt(&self, tenant_id: TenantId, payment_id: PaymentId) -> Result<ReversalOutcome, LedgerError> {
        let payment = self
            .payments
            .find_by_id(&tenant_id, &payment_id)
            .await?
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))?;
        let member = self
            .members
            .find_by_id(&tenant_id, &payment.member_id)
            .await?
            .ok_or_else(|| LedgerError::member_not_found(payment.member_id))?;
        let latest = self
            .payments
            .latest_for_member(&tenant_id, &member.id)
            .await?
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))?;

        let reversal = build_reversal(&member, &payment, &latest)?;
        let outcome = match self.payments.reverse(&reversal).await? {
            Some(member) => ReversalOutcome::DueDateReverted { member },
            None => ReversalOutcome::MemberRemoved {
                member_id: member.id,
            },
        };
        Ok(outcome)
    }
}
