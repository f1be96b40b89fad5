//! Calendar aggregation for a displayed month.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{DateWindow, MemberId};
use crate::domain::member::Member;
use crate::domain::payment::Payment;

/// What happens to a member on a calendar day.
///
/// Variant order is display priority: when one member has several entries
/// on the same day, the first variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEntryKind {
    /// A payment was made.
    Payment,
    /// The membership expired / fell due on or before the reference day.
    Due,
    /// The membership falls due after the reference day.
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub member_id: MemberId,
    pub full_name: String,
    pub kind: CalendarEntryKind,

    /// Paid amount for `Payment` entries.
    pub amount_cents: Option<i64>,
}

/// Builds per-day entries for every day of `window` that has one.
///
/// At most one entry per member per day survives; ties resolve to
/// `Payment > Due > Upcoming`. Payments of members not in `members` are
/// ignored. Within a day entries are ordered by kind, then name.
pub fn calendar_days(
    members: &[Member],
    payments: &[Payment],
    reference: NaiveDate,
    window: &DateWindow,
) -> BTreeMap<NaiveDate, Vec<CalendarEntry>> {
    let names: HashMap<MemberId, &str> = members
        .iter()
        .map(|m| (m.id, m.full_name.as_str()))
        .collect();

    let mut best: HashMap<(NaiveDate, MemberId), CalendarEntry> = HashMap::new();
    let mut offer = |day: NaiveDate, entry: CalendarEntry| match best.entry((day, entry.member_id)) {
        Entry::Occupied(mut current) => {
            if entry.kind < current.get().kind {
                current.insert(entry);
            }
        }
        Entry::Vacant(slot) => {
            slot.insert(entry);
        }
    };

    for payment in payments.iter().filter(|p| window.contains(p.payment_date)) {
        if let Some(name) = names.get(&payment.member_id) {
            offer(
                payment.payment_date,
                CalendarEntry {
                    member_id: payment.member_id,
                    full_name: (*name).to_string(),
                    kind: CalendarEntryKind::Payment,
                    amount_cents: Some(payment.amount_cents),
                },
            );
        }
    }

    for member in members {
        let Some(due) = member.next_payment_due_date() else {
            continue;
        };
        if !window.contains(due) {
            continue;
        }
        let kind = if due <= reference {
            CalendarEntryKind::Due
        } else {
            CalendarEntryKind::Upcoming
        };
        offer(
            due,
            CalendarEntry {
                member_id: member.id,
                full_name: member.full_name.clone(),
                kind,
                amount_cents: None,
            },
        );
    }

    let mut days: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
    for ((day, _), entry) in best {
        days.entry(day).or_default().push(entry);
    }
    for entries in days.values_mut() {
        entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.full_name.cmp(&b.full_name)));
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PaymentId, PlanId, TenantId};
    use crate::domain::payment::{PaymentMethod, ReceiptNumber};
    use crate::domain::schedule::DueWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(name: &str, due: NaiveDate) -> Member {
        let mut m = Member::enroll(MemberId::new(), TenantId::new(), name, "555", date(2024, 1, 1)).unwrap();
        m.schedule = Some(DueWindow::due_on(due).unwrap());
        m
    }

    fn payment(member: &Member, day: NaiveDate) -> Payment {
        Payment::for_member(
            PaymentId::new(),
            member,
            PlanId::new(),
            2500,
            PaymentMethod::Upi,
            day,
            1,
            ReceiptNumber::generate("RCP", day),
        )
        .unwrap()
    }

    #[test]
    fn payment_wins_over_due_on_same_day() {
        let day = date(2025, 3, 5);
        let m = member("Asha", day);
        let p = payment(&m, day);

        let days = calendar_days(&[m.clone()], &[p], date(2025, 3, 10), &DateWindow::month(2025, 3).unwrap());
        let entries = &days[&day];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, CalendarEntryKind::Payment);
        assert_eq!(entries[0].amount_cents, Some(2500));
    }

    #[test]
    fn due_dates_split_by_reference_day() {
        let past = member("Asha", date(2025, 3, 3));
        let future = member("Ravi", date(2025, 3, 20));
        let days = calendar_days(
            &[past, future],
            &[],
            date(2025, 3, 10),
            &DateWindow::month(2025, 3).unwrap(),
        );
        assert_eq!(days[&date(2025, 3, 3)][0].kind, CalendarEntryKind::Due);
        assert_eq!(days[&date(2025, 3, 20)][0].kind, CalendarEntryKind::Upcoming);
    }

    #[test]
    fn entries_outside_window_are_dropped() {
        let m = member("Asha", date(2025, 4, 2));
        let p = payment(&m, date(2025, 2, 28));
        let days = calendar_days(&[m], &[p], date(2025, 3, 10), &DateWindow::month(2025, 3).unwrap());
        assert!(days.is_empty());
    }

    #[test]
    fn same_day_entries_sort_by_kind_then_name() {
        let day = date(2025, 3, 5);
        let zed = member("Zed", day);
        let amy = member("Amy", day);
        let bob = member("Bob", date(2025, 4, 1));
        let p = payment(&bob, day);

        let days = calendar_days(
            &[zed, amy, bob],
            &[p],
            date(2025, 3, 10),
            &DateWindow::month(2025, 3).unwrap(),
        );
        let names: Vec<&str> = days[&day].iter().map(|e| e.full_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Amy", "Zed"]);
    }
}
