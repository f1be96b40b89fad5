//! Ledger error taxonomy.
//!
//! Errors surfaced to callers of the ledger handlers.
//!
//! # Caller Guidance
//!
//! | Error | Meaning for the caller |
//! |-------|------------------------|
//! | Validation | Fix the input; retrying unchanged fails again |
//! | NotFound | Nothing visible under this id in the caller's tenant |
//! | OrderingViolation | Delete `latest_payment_id` first |
//! | InvalidState | The member is already in the requested status |
//! | ConcurrencyConflict | Retries ran out; safe to resubmit |
//! | TransactionFailure | Nothing was applied; safe to resubmit |
//! | TenantUnresolved | No tenant in the calling context |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PaymentId, PlanId, ValidationError};

/// Kind of row a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Member,
    Plan,
    Payment,
}

impl ResourceKind {
    fn label(&self) -> &'static str {
        match self {
            ResourceKind::Member => "Member",
            ResourceKind::Plan => "Plan",
            ResourceKind::Payment => "Payment",
        }
    }
}

/// Ledger errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Bad input: non-positive amount, unusable plan, blank field.
    Validation { field: String, message: String },

    /// Row not resolvable within the caller's tenant. Never distinguishes
    /// "missing" from "owned by another tenant".
    NotFound { resource: ResourceKind, id: String },

    /// Attempt to delete a payment that is not the member's latest.
    OrderingViolation {
        payment_id: PaymentId,
        latest_payment_id: PaymentId,
    },

    /// Status change that does not apply in the current state.
    InvalidState { current: String, attempted: String },

    /// Member row changed underneath the write and retries ran out.
    ConcurrencyConflict(MemberId),

    /// Store failed mid-transaction; nothing was applied.
    TransactionFailure(String),

    /// The caller's tenant could not be resolved.
    TenantUnresolved,
}

impl LedgerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn member_not_found(id: MemberId) -> Self {
        LedgerError::NotFound {
            resource: ResourceKind::Member,
            id: id.to_string(),
        }
    }

    pub fn plan_not_found(id: PlanId) -> Self {
        LedgerError::NotFound {
            resource: ResourceKind::Plan,
            id: id.to_string(),
        }
    }

    pub fn payment_not_found(id: PaymentId) -> Self {
        LedgerError::NotFound {
            resource: ResourceKind::Payment,
            id: id.to_string(),
        }
    }

    pub fn ordering_violation(payment_id: PaymentId, latest_payment_id: PaymentId) -> Self {
        LedgerError::OrderingViolation {
            payment_id,
            latest_payment_id,
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        LedgerError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn transaction_failure(message: impl Into<String>) -> Self {
        LedgerError::TransactionFailure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::Validation { .. } => ErrorCode::ValidationFailed,
            LedgerError::NotFound { resource, .. } => match resource {
                ResourceKind::Member => ErrorCode::MemberNotFound,
                ResourceKind::Plan => ErrorCode::PlanNotFound,
                ResourceKind::Payment => ErrorCode::PaymentNotFound,
            },
            LedgerError::OrderingViolation { .. } => ErrorCode::OrderingViolation,
            LedgerError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            LedgerError::ConcurrencyConflict(_) => ErrorCode::ConcurrencyConflict,
            LedgerError::TransactionFailure(_) => ErrorCode::DatabaseError,
            LedgerError::TenantUnresolved => ErrorCode::TenantUnresolved,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            LedgerError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            LedgerError::NotFound { resource, id } => {
                format!("{} not found: {}", resource.label(), id)
            }
            LedgerError::OrderingViolation { payment_id, .. } => format!(
                "Payment {} is not the most recent payment for this member; delete newer payments first",
                payment_id
            ),
            LedgerError::InvalidState { current, attempted } => {
                format!("Cannot {} a member that is {}", attempted, current)
            }
            LedgerError::ConcurrencyConflict(_) => {
                "The member was updated by someone else. Please try again".to_string()
            }
            LedgerError::TransactionFailure(_) => {
                "The change could not be saved. Please try again".to_string()
            }
            LedgerError::TenantUnresolved => "No organization is selected".to_string(),
        }
    }

    /// Returns true if the caller may retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::ConcurrencyConflict(_) | LedgerError::TransactionFailure(_)
        )
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LedgerError {}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        let id = err.detail("id").unwrap_or("unknown").to_string();
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => LedgerError::Validation {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::MemberNotFound => LedgerError::NotFound {
                resource: ResourceKind::Member,
                id,
            },
            ErrorCode::PlanNotFound => LedgerError::NotFound {
                resource: ResourceKind::Plan,
                id,
            },
            ErrorCode::PaymentNotFound => LedgerError::NotFound {
                resource: ResourceKind::Payment,
                id,
            },
            ErrorCode::InvalidStateTransition => LedgerError::InvalidState {
                current: err.detail("status").unwrap_or("unknown").to_string(),
                attempted: err.detail("attempted").unwrap_or("change").to_string(),
            },
            ErrorCode::OrderingViolation => {
                let parse = |key: &str| err.detail(key).and_then(|v| v.parse::<PaymentId>().ok());
                match (parse("payment_id"), parse("latest_payment_id")) {
                    (Some(payment_id), Some(latest_payment_id)) => LedgerError::OrderingViolation {
                        payment_id,
                        latest_payment_id,
                    },
                    _ => LedgerError::TransactionFailure(err.to_string()),
                }
            }
            ErrorCode::ConcurrencyConflict | ErrorCode::DuplicateReceipt => {
                match err.detail("member_id").and_then(|v| v.parse::<MemberId>().ok()) {
                    Some(member_id) => LedgerError::ConcurrencyConflict(member_id),
                    None => LedgerError::TransactionFailure(err.to_string()),
                }
            }
            ErrorCode::TenantUnresolved => LedgerError::TenantUnresolved,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                LedgerError::TransactionFailure(err.to_string())
            }
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_follow_resource() {
        assert_eq!(
            LedgerError::member_not_found(MemberId::new()).code(),
            ErrorCode::MemberNotFound
        );
        assert_eq!(LedgerError::plan_not_found(PlanId::new()).code(), ErrorCode::PlanNotFound);
        assert_eq!(
            LedgerError::payment_not_found(PaymentId::new()).code(),
            ErrorCode::PaymentNotFound
        );
    }

    #[test]
    fn not_found_message_includes_id() {
        let id = MemberId::new();
        assert!(LedgerError::member_not_found(id).message().contains(&id.to_string()));
    }

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(LedgerError::ConcurrencyConflict(MemberId::new()).is_retryable());
        assert!(LedgerError::transaction_failure("boom").is_retryable());
        assert!(!LedgerError::validation("amount_cents", "must be positive").is_retryable());
        assert!(!LedgerError::ordering_violation(PaymentId::new(), PaymentId::new()).is_retryable());
        assert!(!LedgerError::member_not_found(MemberId::new()).is_retryable());
        assert!(!LedgerError::invalid_state("inactive", "deactivate").is_retryable());
        assert!(!LedgerError::TenantUnresolved.is_retryable());
    }

    #[test]
    fn converts_validation_error() {
        let err: LedgerError = ValidationError::empty_field("phone").into();
        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "phone"));
    }

    #[test]
    fn converts_conflict_domain_error_with_member() {
        let member_id = MemberId::new();
        let domain = DomainError::new(ErrorCode::ConcurrencyConflict, "stale version")
            .with_detail("member_id", member_id.to_string());
        assert_eq!(LedgerError::from(domain), LedgerError::ConcurrencyConflict(member_id));
    }

    #[test]
    fn converts_ordering_domain_error() {
        let payment_id = PaymentId::new();
        let latest = PaymentId::new();
        let domain = DomainError::new(ErrorCode::OrderingViolation, "not latest")
            .with_detail("payment_id", payment_id.to_string())
            .with_detail("latest_payment_id", latest.to_string());
        assert_eq!(
            LedgerError::from(domain),
            LedgerError::ordering_violation(payment_id, latest)
        );
    }

    #[test]
    fn database_error_becomes_transaction_failure() {
        let err: LedgerError = DomainError::database("connection reset").into();
        assert!(matches!(err, LedgerError::TransactionFailure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn converts_to_domain_error() {
        let err = LedgerError::ordering_violation(PaymentId::new(), PaymentId::new());
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());
    }

    #[test]
    fn converts_status_transition_error() {
        let domain = DomainError::new(ErrorCode::InvalidStateTransition, "Member is already inactive")
            .with_detail("status", "inactive")
            .with_detail("attempted", "deactivate");
        let err = LedgerError::from(domain);
        assert_eq!(err, LedgerError::invalid_state("inactive", "deactivate"));
        assert_eq!(err.message(), "Cannot deactivate a member that is inactive");
    }

    #[test]
    fn display_matches_message() {
        let err = LedgerError::TenantUnresolved;
        assert_eq!(format!("{}", err), err.message());
    }
}
