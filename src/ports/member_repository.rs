//! Member repository port.
//!
//! Defines the contract for persisting and retrieving Member aggregates.
//!
//! # Design
//!
//! - **Tenant scoped**: every lookup takes the tenant; a member of another
//!   tenant is indistinguishable from a missing one
//! - **Write-sets**: writes take a complete write-set from
//!   `domain::ledger` and apply it in one transaction
//! - **Optimistic locking**: updates carry the version they were computed
//!   from; a mismatch fails with `ConcurrencyConflict`

use crate::domain::foundation::{DomainError, MemberId, TenantId};
use crate::domain::ledger::{Enrollment, StatusChange};
use crate::domain::member::Member;
use async_trait::async_trait;

/// Repository port for Member aggregate persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a member by ID within a tenant.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &MemberId,
    ) -> Result<Option<Member>, DomainError>;

    /// List all members of a tenant, ordered by name.
    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<Member>, DomainError>;

    /// Persist a new member together with its founding payment and audit events.
    ///
    /// Returns the member as stored.
    ///
    /// # Errors
    ///
    /// - `DuplicateReceipt` if the founding payment's receipt number is taken
    /// - `DatabaseError` on persistence failure; nothing is written
    async fn enroll(&self, enrollment: &Enrollment) -> Result<Member, DomainError>;

    /// Apply a status change and its audit event.
    ///
    /// Returns the member as stored.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist in the tenant
    /// - `ConcurrencyConflict` if the member version moved
    /// - `DatabaseError` on persistence failure
    async fn apply_status_change(&self, change: &StatusChange) -> Result<Member, DomainError>;
}
