//! Pure aggregate statistics over collection snapshots.
//!
//! Nothing here is ever persisted: every figure is recomputed from the
//! records it summarizes. Empty inputs always produce 0, never NaN.

use chrono::NaiveDate;

pub const DAYS_IN_WEEK: usize = 7;

/// Rounded mean of `value` over `records`; 0 when there are none.
pub fn average_by<T>(records: &[T], value: impl Fn(&T) -> f64) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let total: f64 = records.iter().map(value).sum();
    round_percent(total / records.len() as f64)
}

/// Plain floating-point sum of `value` over `records`.
pub fn sum_by<T>(records: &[T], value: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(value).sum()
}

/// Number of records matching `pred`.
pub fn count_where<T>(records: &[T], pred: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|r| pred(*r)).count()
}

/// `part / whole` as a percentage, 0 when `whole` is empty.
pub fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    round_percent(part as f64 / whole as f64 * 100.0)
}

/// Share of a 7-slot week that was ticked, unrounded.
pub fn weekly_percentage(week: &[bool; DAYS_IN_WEEK]) -> f64 {
    let done = week.iter().filter(|d| **d).count();
    done as f64 / DAYS_IN_WEEK as f64 * 100.0
}

/// Share of a 7-slot week that was ticked, rounded.
pub fn streak_consistency(week: &[bool; DAYS_IN_WEEK]) -> u32 {
    round_percent(weekly_percentage(week))
}

/// Whole days from `today` until `target`; negative once it has passed.
pub fn days_remaining(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// [`days_remaining`] floored at 0, for deadlines that cannot be overdue.
pub fn days_remaining_floored(target: NaiveDate, today: NaiveDate) -> i64 {
    days_remaining(target, today).max(0)
}

/// `min(saved / target, 1) * 100`; 0 when there is no positive target.
pub fn savings_progress(saved: f64, target: f64) -> f64 {
    if target.is_nan() || target <= 0.0 || !saved.is_finite() {
        return 0.0;
    }
    (saved / target).clamp(0.0, 1.0) * 100.0
}

fn round_percent(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u32
}
