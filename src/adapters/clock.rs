//! Clock adapters.

use chrono::{NaiveDate, Utc};

use crate::ports::Clock;

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same day. Useful for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_day() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }
}
