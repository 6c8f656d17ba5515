use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft};
use crate::error::{require_text, ValidationError};
use crate::metrics::{self, DAYS_IN_WEEK};
use crate::paths;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_EMOJI: &str = "✨";
pub const DEFAULT_GOAL_DAYS: u32 = 30;
pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_COLOR: &str = "blue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: RecordId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    /// Target streak length in days.
    #[serde(default = "default_goal_days")]
    pub goal_days: u32,
    #[serde(default = "default_color")]
    pub color: String,
    /// Days the habit was done.
    #[serde(default)]
    pub completed: BTreeSet<NaiveDate>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

fn default_goal_days() -> u32 {
    DEFAULT_GOAL_DAYS
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Habit {
    pub fn is_done(&self, date: NaiveDate) -> bool {
        self.completed.contains(&date)
    }

    /// Flip membership of `date`. Toggling the same day twice is a no-op.
    pub fn toggle(&mut self, date: NaiveDate) {
        if !self.completed.remove(&date) {
            self.completed.insert(date);
        }
    }

    /// Monday..Sunday of the week containing `today`.
    pub fn weekly_progress(&self, today: NaiveDate) -> [bool; DAYS_IN_WEEK] {
        let monday = week_start(today);
        let mut week = [false; DAYS_IN_WEEK];
        for (offset, slot) in week.iter_mut().enumerate() {
            *slot = self.is_done(monday + Duration::days(offset as i64));
        }
        week
    }

    pub fn consistency(&self, today: NaiveDate) -> u32 {
        metrics::streak_consistency(&self.weekly_progress(today))
    }

    /// Consecutive done days ending today, or ending yesterday when today
    /// has not been ticked yet.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let mut day = if self.is_done(today) {
            today
        } else {
            today - Duration::days(1)
        };
        let mut streak = 0;
        while self.is_done(day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }

    /// Progress of the current streak toward `goal_days`.
    pub fn goal_completion(&self, today: NaiveDate) -> u32 {
        let goal = self.goal_days.max(1) as usize;
        let streak = (self.current_streak(today) as usize).min(goal);
        metrics::percent_of(streak, goal)
    }

    /// The last `days` days ending today, oldest first.
    pub fn history(&self, today: NaiveDate, days: u32) -> Vec<(NaiveDate, bool)> {
        (0..i64::from(days))
            .rev()
            .map(|back| {
                let d = today - Duration::days(back);
                (d, self.is_done(d))
            })
            .collect()
    }
}

pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

impl Record for Habit {
    const SLOT: &'static str = paths::SLOT_HABITS;
    const KIND: &'static str = "habit";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(today: NaiveDate) -> Vec<Self> {
        let last = |n: i64| -> BTreeSet<NaiveDate> {
            (0..n).map(|back| today - Duration::days(back)).collect()
        };
        vec![
            Habit {
                id: 1,
                name: "Morning Meditation".into(),
                category: "wellness".into(),
                emoji: "🧘".into(),
                goal_days: 30,
                color: "lavender".into(),
                completed: last(5),
            },
            Habit {
                id: 2,
                name: "Read 30 mins".into(),
                category: "learning".into(),
                emoji: "📚".into(),
                goal_days: 21,
                color: "blue".into(),
                completed: last(3),
            },
            Habit {
                id: 3,
                name: "Exercise".into(),
                category: "health".into(),
                emoji: "🏃".into(),
                goal_days: 30,
                color: "sage".into(),
                completed: last(2),
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub name: String,
    pub emoji: String,
    pub goal_days: u32,
    pub category: String,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: DEFAULT_EMOJI.to_string(),
            goal_days: DEFAULT_GOAL_DAYS,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl Draft for HabitDraft {
    type Record = Habit;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.goal_days == 0 {
            return Err(ValidationError::NotPositive { field: "goal days" });
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, _clock: &dyn Clock) -> Habit {
        Habit {
            id,
            name: self.name.trim().to_string(),
            category: self.category,
            emoji: self.emoji,
            goal_days: self.goal_days,
            color: DEFAULT_COLOR.to_string(),
            completed: BTreeSet::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub fn toggle_day(
    habits: &Collection<Habit>,
    id: RecordId,
    date: NaiveDate,
) -> (Collection<Habit>, bool) {
    editor::modify(habits, id, |h: &mut Habit| h.toggle(date))
}

/// Mean of each habit's unrounded weekly consistency, rounded once.
pub fn habit_consistency(habits: &[Habit], today: NaiveDate) -> u32 {
    metrics::average_by(habits, |h| metrics::weekly_percentage(&h.weekly_progress(today)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    // A Friday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn seeded() -> Collection<Habit> {
        Habit::seed(today()).into()
    }

    #[test]
    fn toggle_twice_restores_state() {
        let habits = seeded();
        let day = today() - Duration::days(10);
        let (once, found) = toggle_day(&habits, 3, day);
        assert!(found);
        assert!(once.get(3).unwrap().is_done(day));
        let (twice, _) = toggle_day(&once, 3, day);
        assert_eq!(twice, habits);
    }

    #[test]
    fn toggle_unknown_habit_is_a_no_op() {
        let habits = seeded();
        let (next, found) = toggle_day(&habits, 99, today());
        assert!(!found);
        assert_eq!(next, habits);
    }

    #[test]
    fn weekly_progress_covers_monday_to_sunday() {
        let habits = seeded();
        // Exercise: Thursday and Friday.
        let week = habits.get(3).unwrap().weekly_progress(today());
        assert_eq!(week, [false, false, false, true, true, false, false]);
        assert_eq!(habits.get(3).unwrap().consistency(today()), 29);
        // Meditation: Monday..Friday.
        assert_eq!(habits.get(1).unwrap().consistency(today()), 71);
    }

    #[test]
    fn streak_counts_back_from_today_or_yesterday() {
        let mut habit = seeded().get(1).unwrap().clone();
        assert_eq!(habit.current_streak(today()), 5);
        habit.toggle(today());
        assert_eq!(habit.current_streak(today()), 4);
        habit.toggle(today() - Duration::days(2));
        assert_eq!(habit.current_streak(today()), 1);
    }

    #[test]
    fn goal_completion_caps_at_100() {
        let habit = seeded().get(2).unwrap().clone();
        assert_eq!(habit.goal_completion(today()), 14);
        let mut long = habit.clone();
        long.goal_days = 2;
        assert_eq!(long.goal_completion(today()), 100);
    }

    #[test]
    fn aggregate_consistency() {
        let habits = seeded();
        // (5 + 3 + 2) / 7 / 3 * 100 = 47.6
        assert_eq!(habit_consistency(&habits, today()), 48);
        assert_eq!(habit_consistency(&[], today()), 0);
    }

    #[test]
    fn create_requires_name() {
        let clock = FixedClock::on(today());
        assert!(editor::create(&seeded(), HabitDraft::new("  "), &clock).is_err());
        let (habits, habit) = editor::create(&seeded(), HabitDraft::new("Stretch"), &clock).unwrap();
        assert_eq!(habits.len(), 4);
        assert!(habit.completed.is_empty());
        assert_eq!(habit.emoji, DEFAULT_EMOJI);
    }

    #[test]
    fn history_is_oldest_first() {
        let habit = seeded().get(3).unwrap().clone();
        let h = habit.history(today(), 3);
        assert_eq!(h.len(), 3);
        assert_eq!(h[2], (today(), true));
        assert_eq!(h[0], (today() - Duration::days(2), false));
    }
}
