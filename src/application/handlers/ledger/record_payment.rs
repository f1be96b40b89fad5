//! RecordPaymentHandler - Command handler for recording member payments.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, PlanId, TenantId};
use crate::domain::ledger::{build_posting, LedgerError, PaymentDetails};
use crate::domain::member::Member;
use crate::domain::payment::{Payment, PaymentMethod, ReceiptNumber};
use crate::domain::plan::MembershipPlan;
use crate::ports::{Clock, MemberRepository, PaymentLedger, PlanCatalog, TenantContext};

use super::WritePolicy;

/// Command to record a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    pub amount_cents: i64,
    pub method: PaymentMethod,

    /// Defaults to today.
    pub payment_date: Option<NaiveDate>,
}

/// Result of a recorded payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentResult {
    pub payment: Payment,

    /// Member after the payment, with its advanced schedule.
    pub member: Member,
}

/// Handler for recording payments.
///
/// The new period is anchored on the member's current due date, never on
/// the payment date. Version conflicts are retried with a fresh read.
pub struct RecordPaymentHandler {
    tenant: Arc<dyn TenantContext>,
    plans: Arc<dyn PlanCatalog>,
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentLedger>,
    clock: Arc<dyn Clock>,
    policy: WritePolicy,
}

impl RecordPaymentHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        plans: Arc<dyn PlanCatalog>,
        members: Arc<dyn MemberRepository>,
        payments: Arc<dyn PaymentLedger>,
        clock: Arc<dyn Clock>,
        policy: WritePolicy,
    ) -> Self {
        Self {
            tenant,
            plans,
            members,
            payments,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<RecordPaymentResult, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        let plan = self
            .plans
            .find_plan(&tenant_id, &cmd.plan_id)
            .await?
            .ok_or_else(|| LedgerError::plan_not_found(cmd.plan_id))?;
        let details = PaymentDetails {
            amount_cents: cmd.amount_cents,
            method: cmd.method,
            payment_date: cmd.payment_date.unwrap_or_else(|| self.clock.today()),
        };

        let (plan, details) = (&plan, &details);
        let member_id = cmd.member_id;
        let result = self
            .policy
            .run("record_payment", move |_| async move {
                self.attempt(tenant_id, member_id, plan, details).await
            })
            .await?;

        tracing::info!(
            tenant_id = %tenant_id,
            member_id = %member_id,
            payment_id = %result.payment.id,
            days_late = result.payment.days_late,
            is_founding = result.payment.is_founding,
            "payment recorded"
        );
        Ok(result)
    }

    async fn attempt(
        &self,
        tenant_id: TenantId,
        member_id: MemberId,
        plan: &MembershipPlan,
        details: &PaymentDetails,
    ) -> Result<RecordPaymentResult, LedgerError> {
        let member = self
            .members
            .find_by_id(&tenant_id, &member_id)
            .await?
            .ok_or_else(|| LedgerError::member_not_found(member_id))?;
        let latest = self.payments.latest_for_member(&tenant_id, &member_id).await?;

        let posting = build_posting(
            &member,
            plan,
            details,
            latest.map(|p| p.sequence),
            ReceiptNumber::generate(&self.policy.receipt_prefix, details.payment_date),
        )?;
        let member = self.payments.post(&posting).await?;

        Ok(RecordPaymentResult {
            payment: posting.payment,
            member,
        })
    }
}
