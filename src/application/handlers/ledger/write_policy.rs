//! Bounded retry for ledger writes.
//!
//! Every mutating handler recomputes its write-set from fresh reads on each
//! attempt, so a retry after a version conflict never reuses stale state.

use std::future::Future;

use crate::config::LedgerConfig;
use crate::domain::ledger::LedgerError;
use crate::domain::payment::DEFAULT_RECEIPT_PREFIX;

/// Write settings shared by the mutating handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePolicy {
    /// Attempts per write, including the first.
    pub max_attempts: u32,

    /// Prefix of generated receipt numbers.
    pub receipt_prefix: String,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            receipt_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
        }
    }
}

impl From<&LedgerConfig> for WritePolicy {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            max_attempts: config.max_write_attempts,
            receipt_prefix: config.receipt_prefix.clone(),
        }
    }
}

impl WritePolicy {
    /// Runs `attempt` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `attempt` receives the 1-based attempt number. The last error is
    /// returned unchanged once attempts are exhausted.
    pub(crate) async fn run<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T, LedgerError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, LedgerError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut n = 1;
        loop {
            match attempt(n).await {
                Err(err) if err.is_retryable() && n < max_attempts => {
                    tracing::warn!(
                        operation,
                        attempt = n,
                        max_attempts,
                        error = %err,
                        "ledger write conflicted, retrying"
                    );
                    n += 1;
                }
                result => return result,
            }
        }
    }
}
