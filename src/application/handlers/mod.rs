//! Command and query handlers.
//!
//! - `ledger` - Member lifecycle and payment ledger
//! - `dashboard` - Read-only due-status and calendar views

pub mod dashboard;
pub mod ledger;

#[cfg(test)]
pub(crate) mod test_support;
