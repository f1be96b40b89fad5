//! Payment ledger port.
//!
//! Stores payments and applies postings and reversals atomically with the
//! member update and audit event they imply.
//!
//! # Ordering
//!
//! Each member's payments carry a 1-based `sequence`. "Latest" means the
//! highest sequence, which is the most recently created payment regardless
//! of its payment date.

use crate::domain::foundation::{DateWindow, DomainError, MemberId, PaymentId, TenantId};
use crate::domain::ledger::{PaymentPosting, PaymentReversal};
use crate::domain::member::Member;
use crate::domain::payment::Payment;
use async_trait::async_trait;

/// Port for payment persistence.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Find a payment by ID within a tenant.
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &PaymentId,
    ) -> Result<Option<Payment>, DomainError>;

    /// Most recently created payment of a member.
    async fn latest_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Option<Payment>, DomainError>;

    /// All payments of a member in creation order.
    async fn list_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Vec<Payment>, DomainError>;

    /// Payments of a tenant whose payment date falls inside `window`.
    async fn list_paid_between(
        &self,
        tenant_id: &TenantId,
        window: &DateWindow,
    ) -> Result<Vec<Payment>, DomainError>;

    /// Insert the payment, update the member and append the audit event.
    ///
    /// Returns the member as stored.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist in the tenant
    /// - `ConcurrencyConflict` if the member version moved or the sequence is taken
    /// - `DuplicateReceipt` if the receipt number is taken within the tenant
    /// - `DatabaseError` on persistence failure; nothing is written
    async fn post(&self, posting: &PaymentPosting) -> Result<Member, DomainError>;

    /// Delete the payment and either restore the member or remove it.
    ///
    /// Returns the restored member, or `None` when the member was removed
    /// together with its remaining payments and audit trail.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` / `MemberNotFound` if either is gone
    /// - `OrderingViolation` if the payment is no longer the latest
    /// - `ConcurrencyConflict` if the member version moved
    /// - `DatabaseError` on persistence failure; nothing is written
    async fn reverse(&self, reversal: &PaymentReversal) -> Result<Option<Member>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn PaymentLedger) {}
    }
}
