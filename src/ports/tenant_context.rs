//! Tenant context port.
//!
//! Resolves the tenant of the caller. Every ledger read and write is scoped
//! to the tenant returned here; handlers never accept a tenant from input.

use crate::domain::foundation::{DomainError, TenantId};

/// Source of the caller's tenant.
///
/// Implementations typically read it from the authenticated session.
pub trait TenantContext: Send + Sync {
    /// Returns the current tenant.
    ///
    /// # Errors
    ///
    /// - `TenantUnresolved` if no tenant is associated with the caller
    fn current_tenant_id(&self) -> Result<TenantId, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_context_is_object_safe() {
        fn _accepts_dyn(_ctx: &dyn TenantContext) {}
    }
}
