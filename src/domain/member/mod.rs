//! Member domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Member aggregate and billing snapshot
//! - `status` - Active / inactive status

mod aggregate;
mod status;

pub use aggregate::{BillingSnapshot, Member};
pub use status::MemberStatus;
