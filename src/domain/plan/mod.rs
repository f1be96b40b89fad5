//! Plan catalog domain module.
//!
//! A plan fixes the price and the number of months one payment buys.
//! Plans are immutable once a payment references them; edits only affect
//! future payments.

mod membership_plan;

pub use membership_plan::MembershipPlan;
