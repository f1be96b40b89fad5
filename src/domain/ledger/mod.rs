//! Payment ledger domain module.
//!
//! Turns operator commands into atomic write-sets and defines the error
//! taxonomy surfaced to callers.
//!
//! # Module Structure
//!
//! - `errors` - `LedgerError` taxonomy
//! - `posting` - Enrollment and payment recording
//! - `reversal` - Deletion of the latest payment
//! - `write_set` - Atomic units handed to the store

mod errors;
mod posting;
mod reversal;
mod write_set;

pub use errors::{LedgerError, ResourceKind};
pub use posting::{build_enrollment, build_posting, PaymentDetails};
pub use reversal::{build_reversal, ReversalOutcome};
pub use write_set::{Enrollment, PaymentPosting, PaymentReversal, StatusChange};
