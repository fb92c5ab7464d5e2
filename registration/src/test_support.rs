//! Test doubles shared by unit tests and the HTTP contract suite.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature, which the
//! crate enables for its own integration tests.

use std::sync::Mutex;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a settable instant.
///
/// Registration rules only look at the UTC calendar date, so tests usually
/// build one with [`SettableClock::at_noon`].
pub struct SettableClock(Mutex<DateTime<Utc>>);

impl SettableClock {
    /// Start the clock at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Start the clock at midday UTC on `date`.
    #[must_use]
    pub fn at_noon(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(Utc.from_utc_datetime(&noon))
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let mut now = self.lock_clock();
        if let Some(next) = now.checked_add_days(Days::new(days)) {
            *now = next;
        }
    }

    /// Current UTC calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.lock_clock().date_naive()
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for SettableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
