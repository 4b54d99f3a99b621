//! Time utilities: injectable clock and timezone-aware day keys.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::GoalError;

/// Source of "now" for everything that depends on wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock. Clones share the same instant, so a test can keep
/// one handle while the store owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Calendar day of `now` in the user's timezone.
pub fn local_day(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

pub fn parse_timezone(tz: &str) -> Result<Tz, GoalError> {
    tz.trim()
        .parse()
        .map_err(|_| GoalError::InvalidTimezone(tz.to_string()))
}

/// ISO `YYYY-MM-DD` key for a calendar day.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
