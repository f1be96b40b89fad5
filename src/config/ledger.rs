//! Ledger write configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::payment::DEFAULT_RECEIPT_PREFIX;

/// Upper bound for `max_write_attempts`.
pub const MAX_WRITE_ATTEMPTS: u32 = 10;

/// Ledger write configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Attempts per mutating operation before a version conflict is reported
    #[serde(default = "default_max_write_attempts")]
    pub max_write_attempts: u32,

    /// Prefix of generated receipt numbers
    #[serde(default = "default_receipt_prefix")]
    pub receipt_prefix: String,
}

impl LedgerConfig {
    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_write_attempts == 0 || self.max_write_attempts > MAX_WRITE_ATTEMPTS {
            return Err(ValidationError::InvalidWriteAttempts {
                actual: self.max_write_attempts,
                max: MAX_WRITE_ATTEMPTS,
            });
        }
        let prefix = &self.receipt_prefix;
        if prefix.is_empty()
            || prefix.len() > 8
            || !prefix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidReceiptPrefix);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: default_max_write_attempts(),
            receipt_prefix: default_receipt_prefix(),
        }
    }
}

fn default_max_write_attempts() -> u32 {
    3
}

fn default_receipt_prefix() -> String {
    DEFAULT_RECEIPT_PREFIX.to_string()
}
