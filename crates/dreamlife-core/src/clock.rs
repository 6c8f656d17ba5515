//! Time source for everything that depends on "now" or "today".
//!
//! Record ids, letter lock state, streaks and deadlines all read the clock
//! through this trait so tests (and the `--today` flag) can pin it.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used for date arithmetic.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock; `today` follows the local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a given instant and calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }

    /// Noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self {
            now: date.and_time(noon).and_utc(),
            today: date,
        }
    }

    /// Same clock moved forward (or back, for negative `days`) by whole days.
    pub fn shifted(self, days: i64) -> Self {
        let delta = chrono::Duration::days(days);
        Self {
            now: self.now + delta,
            today: self.today + delta,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }

    #[test]
    fn shifted_moves_both_instant_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        let later = FixedClock::on(date).shifted(3);
        assert_eq!(later.today(), NaiveDate::from_ymd_opt(2027, 1, 2).unwrap());
        assert_eq!(later.now().date_naive(), later.today());
    }
}
