//! Dashboard domain module.
//!
//! Read-only views derived from members and payments:
//!
//! - `due_status` - Due today / overdue / due tomorrow / upcoming / paid buckets
//! - `calendar` - Per-day entries for a displayed month

pub mod calendar;
pub mod due_status;

pub use calendar::{calendar_days, CalendarEntry, CalendarEntryKind};
pub use due_status::{classify, classify_member, DueBuckets, DueCounts, DueStatus, MemberDueEntry};
