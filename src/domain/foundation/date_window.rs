//! Inclusive calendar-day window, typically one displayed month.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// An inclusive range of calendar days.
///
/// # Invariants
///
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates the window covering a whole calendar month.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for a month outside 1..=12 or an unrepresentable year.
    pub fn month(year: i32, month: u32) -> Result<Self, ValidationError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ValidationError::out_of_range("month", 1, 12, i64::from(month)))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| ValidationError::invalid_format("year", "out of supported range"))?;
        Ok(Self { start, end })
    }

    /// Creates the window for the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
