//! Receipt numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

/// Default prefix for generated receipt numbers.
pub const DEFAULT_RECEIPT_PREFIX: &str = "RCP";

/// Human-facing receipt identifier, unique per tenant.
///
/// Format: `<PREFIX>-<YYYYMMDD>-<8 hex digits>`, e.g. `RCP-20250205-3F9A1C2B`.
/// Uniqueness is enforced by the store; a collision surfaces as a retryable
/// conflict and a fresh number is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptNumber(String);

impl ReceiptNumber {
    /// Draws a new random receipt number for a payment made on `payment_date`.
    pub fn generate(prefix: &str, payment_date: NaiveDate) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}-{}-{}",
            prefix,
            payment_date.format("%Y%m%d"),
            random[..8].to_uppercase()
        ))
    }

    /// Wraps an existing receipt number (e.g. loaded from storage).
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("receipt_number"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
