//! Due-date calculation.
//!
//! Pure calendar arithmetic that turns an anchor date and a plan into the
//! next billing period. The anchor is always the member's currently
//! scheduled due date (or the joining date for a brand-new member), never
//! the day cash arrived.

mod due_date;

pub use due_date::{compute_due, days_late, DueWindow};
