//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, date windows, errors)
//! - `plan` - Membership plans and their durations
//! - `schedule` - Due-date calculation
//! - `member` - Member aggregate and status lifecycle
//! - `payment` - Payment records, methods and receipt numbers
//! - `audit` - Append-only change history
//! - `ledger` - Write-sets for recording and reversing payments
//! - `dashboard` - Due-status classification and calendar views

pub mod audit;
pub mod dashboard;
pub mod foundation;
pub mod ledger;
pub mod member;
pub mod payment;
pub mod plan;
pub mod schedule;
