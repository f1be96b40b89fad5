//! Tenant context adapters.

use crate::domain::foundation::{DomainError, ErrorCode, TenantId};
use crate::ports::TenantContext;

/// Tenant context for a caller whose tenant is already known.
///
/// `None` models an unauthenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct FixedTenantContext {
    tenant_id: Option<TenantId>,
}

impl FixedTenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id: Some(tenant_id),
        }
    }

    pub fn unresolved() -> Self {
        Self { tenant_id: None }
    }
}

impl TenantContext for FixedTenantContext {
    fn current_tenant_id(&self) -> Result<TenantId, DomainError> {
        self.tenant_id.ok_or_else(|| {
            DomainError::new(
                ErrorCode::TenantUnresolved,
                "No tenant is associated with the caller",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_configured_tenant() {
        let tenant = TenantId::new();
        assert_eq!(FixedTenantContext::new(tenant).current_tenant_id().unwrap(), tenant);
    }

    #[test]
    fn unresolved_context_fails() {
        let err = FixedTenantContext::unresolved().current_tenant_id().unwrap_err();
        assert_eq!(err.code, ErrorCode::TenantUnresolved);
    }
}
