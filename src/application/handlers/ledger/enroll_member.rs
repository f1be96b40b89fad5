//! EnrollMemberHandler - Command handler for enrolling new members.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, PlanId};
use crate::domain::ledger::{build_enrollment, LedgerError, PaymentDetails};
use crate::domain::member::Member;
use crate::domain::payment::{Payment, PaymentMethod, ReceiptNumber};
use crate::ports::{MemberRepository, PlanCatalog, TenantContext};

use super::WritePolicy;

/// Payment collected at enrollment.
#[derive(Debug, Clone)]
pub struct InitialPayment {
    pub amount_cents: i64,
    pub method: PaymentMethod,

    /// Defaults to the joining date.
    pub payment_date: Option<NaiveDate>,
}

/// Command to enroll a member.
#[derive(Debug, Clone)]
pub struct EnrollMemberCommand {
    pub full_name: String,
    pub phone: String,
    pub joining_date: NaiveDate,
    pub plan_id: Option<PlanId>,
    pub initial_payment: Option<InitialPayment>,
}

/// Result of successful enrollment.
#[derive(Debug, Clone)]
pub struct EnrollMemberResult {
    pub member: Member,
    pub founding_payment: Option<Payment>,
}

/// Handler for enrolling members.
///
/// With an initial payment, that payment is the member's founding payment:
/// deleting it later removes the member.
pub struct EnrollMemberHandler {
    tenant: Arc<dyn TenantContext>,
    plans: Arc<dyn PlanCatalog>,
    members: Arc<dyn MemberRepository>,
    policy: WritePolicy,
}

impl EnrollMemberHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        plans: Arc<dyn PlanCatalog>,
        members: Arc<dyn MemberRepository>,
        policy: WritePolicy,
    ) -> Self {
        Self {
            tenant,
            plans,
            members,
            policy,
        }
    }

    pub async fn handle(&self, cmd: EnrollMemberCommand) -> Result<EnrollMemberResult, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;

        let plan = match cmd.plan_id {
            Some(plan_id) => Some(
                self.plans
                    .find_plan(&tenant_id, &plan_id)
                    .await?
                    .ok_or_else(|| LedgerError::plan_not_found(plan_id))?,
            ),
            None => None,
        };

        let joining_date = cmd.joining_date;
        let member = Member::enroll(MemberId::new(), tenant_id, cmd.full_name, cmd.phone, joining_date)?;
        let details = cmd.initial_payment.map(|p| PaymentDetails {
            amount_cents: p.amount_cents,
            method: p.method,
            payment_date: p.payment_date.unwrap_or(joining_date),
        });
        let receipt_date = details.as_ref().map_or(joining_date, |d| d.payment_date);

        let (member, plan, details) = (&member, plan.as_ref(), details.as_ref());
        let result = self
            .policy
            .run("enroll_member", move |_| async move {
                let enrollment = build_enrollment(
                    member.clone(),
                    plan,
                    details,
                    ReceiptNumber::generate(&self.policy.receipt_prefix, receipt_date),
                )?;
                let stored = self.members.enroll(&enrollment).await?;
                Ok::<_, LedgerError>(EnrollMemberResult {
                    member: stored,
                    founding_payment: enrollment.founding_payment,
                })
            })
            .await?;

        tracing::info!(
            tenant_id = %tenant_id,
            member_id = %result.member.id,
            founding_payment = result.founding_payment.is_some(),
            "member enrolled"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedTenantContext;
    use crate::application::handlers::test_support::{date, Fixture};
    use crate::domain::audit::ChangeType;
    use crate::ports::{AuditTrail, PaymentLedger};

    fn command(fx: &Fixture) -> EnrollMemberCommand {
        EnrollMemberCommand {
            full_name: "Asha Rao".to_string(),
            phone: "555".to_string(),
            joining_date: date(2025, 1, 1),
            plan_id: Some(fx.monthly.id),
            initial_payment: Some(InitialPayment {
                amount_cents: 1000_00,
                method: PaymentMethod::Upi,
                payment_date: None,
            }),
        }
    }

    #[tokio::test]
    async fn enrolls_with_founding_payment() {
        let fx = Fixture::new().await;
        let result = fx.enroll_handler().handle(command(&fx)).await.unwrap();

        assert_eq!(result.member.next_payment_due_date(), Some(date(2025, 2, 1)));
        assert_eq!(result.member.membership_end_date(), Some(date(2025, 1, 31)));
        let payment = result.founding_payment.unwrap();
        assert!(payment.is_founding);
        assert_eq!(payment.payment_date, date(2025, 1, 1));
        assert!(payment.receipt_number.as_str().starts_with("RCP-20250101-"));

        let stored = fx
            .store
            .latest_for_member(&fx.tenant_id, &result.member.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, payment.id);
        let kinds: Vec<ChangeType> = AuditTrail::list_for_member(fx.store.as_ref(), &fx.tenant_id, &result.member.id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.change_type)
            .collect();
        assert_eq!(kinds, vec![ChangeType::MemberCreated, ChangeType::PaymentCreated]);
    }

    #[tokio::test]
    async fn enrolls_on_plan_without_payment() {
        let fx = Fixture::new().await;
        let mut cmd = command(&fx);
        cmd.initial_payment = None;

        let result = fx.enroll_handler().handle(cmd).await.unwrap();
        assert!(result.founding_payment.is_none());
        assert_eq!(result.member.next_payment_due_date(), Some(date(2025, 2, 1)));
        assert_eq!(fx.store.payment_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let fx = Fixture::new().await;
        let mut cmd = command(&fx);
        let missing = PlanId::new();
        cmd.plan_id = Some(missing);

        let err = fx.enroll_handler().handle(cmd).await.unwrap_err();
        assert_eq!(err, LedgerError::plan_not_found(missing));
        assert_eq!(fx.store.member_count().await, 0);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let fx = Fixture::new().await;
        let mut cmd = command(&fx);
        cmd.full_name = "   ".to_string();

        let err = fx.enroll_handler().handle(cmd).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "full_name"));
    }

    #[tokio::test]
    async fn unresolved_tenant_is_rejected() {
        let fx = Fixture::new().await;
        let handler = EnrollMemberHandler::new(
            Arc::new(FixedTenantContext::unresolved()),
            fx.store.clone(),
            fx.store.clone(),
            WritePolicy::default(),
        );
        let err = handler.handle(command(&fx)).await.unwrap_err();
        assert_eq!(err, LedgerError::TenantUnresolved);
    }
}
