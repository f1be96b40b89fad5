//! Clock port.
//!
//! Supplies "today" to handlers that default the reference day or the
//! payment date.

use chrono::NaiveDate;

/// Calendar source.
pub trait Clock: Send + Sync {
    /// Current calendar day.
    fn today(&self) -> NaiveDate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
