//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Context Ports
//!
//! - `TenantContext` - Resolves the caller's tenant
//! - `Clock` - Supplies the current day
//!
//! ## Storage Ports
//!
//! - `PlanCatalog` - Read access to membership plans
//! - `MemberRepository` - Member persistence and status changes
//! - `PaymentLedger` - Payment posting and reversal
//! - `AuditTrail` - Append-only change history

mod audit_trail;
mod clock;
mod member_repository;
mod payment_ledger;
mod plan_catalog;
mod tenant_context;

pub use audit_trail::AuditTrail;
pub use clock::Clock;
pub use member_repository::MemberRepository;
pub use payment_ledger::PaymentLedger;
pub use plan_catalog::PlanCatalog;
pub use tenant_context::TenantContext;
