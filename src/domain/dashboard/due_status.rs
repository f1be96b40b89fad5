//! Due-status classification for the dashboard.
//!
//! Read-only: derives an urgency label per member relative to a reference
//! day and the month being displayed. Labels are never stored.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{DateWindow, MemberId};
use crate::domain::member::Member;
use crate::domain::payment::Payment;

/// Urgency of a member relative to a reference day and view window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// Paid at least once inside the window. Wins over every other label.
    Paid,
    DueToday,
    DueTomorrow,
    /// Due before the reference day, and inside the window.
    Overdue,
    /// Due after tomorrow, and inside the window.
    Upcoming,
    /// None of the above: no schedule, or due outside the window.
    Unscheduled,
}

/// One member as shown in a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDueEntry {
    pub member_id: MemberId,
    pub full_name: String,
    pub phone: String,
    pub next_payment_due_date: Option<NaiveDate>,
    pub status: DueStatus,
}

/// Members partitioned by due status. Every input member lands in exactly
/// one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueBuckets {
    pub due_today: Vec<MemberDueEntry>,
    pub overdue: Vec<MemberDueEntry>,
    pub due_tomorrow: Vec<MemberDueEntry>,
    pub upcoming: Vec<MemberDueEntry>,
    pub paid: Vec<MemberDueEntry>,
    pub unscheduled: Vec<MemberDueEntry>,
}

/// Bucket sizes for summary tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueCounts {
    pub due_today: usize,
    pub overdue: usize,
    pub due_tomorrow: usize,
    pub upcoming: usize,
    pub paid: usize,
    pub unscheduled: usize,
}

impl DueBuckets {
    pub fn counts(&self) -> DueCounts {
        DueCounts {
            due_today: self.due_today.len(),
            overdue: self.overdue.len(),
            due_tomorrow: self.due_tomorrow.len(),
            upcoming: self.upcoming.len(),
            paid: self.paid.len(),
            unscheduled: self.unscheduled.len(),
        }
    }

    /// Total number of classified members.
    pub fn len(&self) -> usize {
        self.due_today.len()
            + self.overdue.len()
            + self.due_tomorrow.len()
            + self.upcoming.len()
            + self.paid.len()
            + self.unscheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, entry: MemberDueEntry) {
        let bucket = match entry.status {
            DueStatus::Paid => &mut self.paid,
            DueStatus::DueToday => &mut self.due_today,
            DueStatus::DueTomorrow => &mut self.due_tomorrow,
            DueStatus::Overdue => &mut self.overdue,
            DueStatus::Upcoming => &mut self.upcoming,
            DueStatus::Unscheduled => &mut self.unscheduled,
        };
        bucket.push(entry);
    }
}

/// Labels a single member.
///
/// Overdue is window-relative: a due date before the reference day only
/// counts as overdue while it lies inside the displayed window.
pub fn classify_member(
    due_date: Option<NaiveDate>,
    paid_in_window: bool,
    reference: NaiveDate,
    window: &DateWindow,
) -> DueStatus {
    if paid_in_window {
        return DueStatus::Paid;
    }
    let Some(due) = due_date else {
        return DueStatus::Unscheduled;
    };

    let tomorrow = reference.succ_opt();
    if due == reference {
        DueStatus::DueToday
    } else if Some(due) == tomorrow {
        DueStatus::DueTomorrow
    } else if due < reference && window.contains(due) {
        DueStatus::Overdue
    } else if due > reference && window.contains(due) {
        DueStatus::Upcoming
    } else {
        DueStatus::Unscheduled
    }
}

/// Partitions `members` by due status.
///
/// `payments` may include payments of other members or outside the window;
/// only those of listed members dated inside the window count. Members keep
/// their input order within each bucket.
pub fn classify(
    members: &[Member],
    payments: &[Payment],
    reference: NaiveDate,
    window: &DateWindow,
) -> DueBuckets {
    let paid: HashSet<MemberId> = payments
        .iter()
        .filter(|p| window.contains(p.payment_date))
        .map(|p| p.member_id)
        .collect();

    let mut buckets = DueBuckets::default();
    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if !seen.insert(member.id) {
            continue;
        }
        let due = member.next_payment_due_date();
        let status = classify_member(due, paid.contains(&member.id), reference, window);
        buckets.push(MemberDueEntry {
            member_id: member.id,
            full_name: member.full_name.clone(),
            phone: member.phone.clone(),
            next_payment_due_date: due,
            status,
        });
    }
    buckets
}
