//! Dashboard query handlers.
//!
//! Read-only handlers for the due-status view and the month calendar.

mod classify_members;
mod get_calendar;

pub use classify_members::{ClassifyMembersHandler, ClassifyMembersQuery, ClassifyMembersResult};
pub use get_calendar::{GetCalendarHandler, GetCalendarQuery, GetCalendarResult};
