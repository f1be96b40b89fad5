//! Audit trail port.
//!
//! Append-only history of member changes. Events are only ever written as
//! part of a ledger write-set, inside the same transaction as the change they
//! describe, so this port is read-only.

use crate::domain::audit::AuditEvent;
use crate::domain::foundation::{DomainError, MemberId, TenantId};
use async_trait::async_trait;

#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// Events of a member in the order they were appended.
    async fn list_for_member(
        &self,
        tenant_id: &TenantId,
        member_id: &MemberId,
    ) -> Result<Vec<AuditEvent>, DomainError>;
}
