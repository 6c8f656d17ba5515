//! The cross-tracker dashboard: every derived figure in one report.

use crate::clock::Clock;
use crate::collection::Store;
use crate::goal::{self, Goal};
use crate::habit::{self, Habit};
use crate::journal::{self, JournalEntry};
use crate::letter::{self, Letter, LetterStats};
use crate::life_area::{self, LifeArea};
use crate::money::{self, MoneyGoal, MoneySummary};
use crate::planner::{self, DayStats, PlannerTask};
use crate::storage::KeyValueStore;
use crate::travel::{self, Destination, TravelStats};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    pub total: usize,
    pub average_progress: u32,
    pub achieved: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitSummary {
    pub total: usize,
    pub consistency: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub date: NaiveDate,
    pub goals: GoalSummary,
    pub habits: HabitSummary,
    pub life_balance: u32,
    pub life_balance_percent: u32,
    pub money: MoneySummary,
    pub letters: LetterStats,
    pub travel: TravelStats,
    pub today: DayStats,
    pub average_mood: Option<u8>,
}

/// Snapshots of every collection the report reads.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub goals: &'a [Goal],
    pub habits: &'a [Habit],
    pub areas: &'a [LifeArea],
    pub money: &'a [MoneyGoal],
    pub letters: &'a [Letter],
    pub destinations: &'a [Destination],
    pub tasks: &'a [PlannerTask],
    pub journal: &'a [JournalEntry],
}

pub fn build(s: Snapshot<'_>, today: NaiveDate) -> ProgressReport {
    ProgressReport {
        date: today,
        goals: GoalSummary {
            total: s.goals.len(),
            average_progress: goal::average_progress(s.goals),
            achieved: goal::achieved_count(s.goals),
        },
        habits: HabitSummary {
            total: s.habits.len(),
            consistency: habit::habit_consistency(s.habits, today),
            longest_streak: s
                .habits
                .iter()
                .map(|h| h.current_streak(today))
                .max()
                .unwrap_or(0),
        },
        life_balance: life_area::overall_balance(s.areas),
        life_balance_percent: life_area::balance_percent(s.areas),
        money: money::summary(s.money),
        letters: letter::stats(s.letters, today),
        travel: travel::stats(s.destinations),
        today: planner::day_stats(s.tasks, today),
        average_mood: journal::average_mood(s.journal),
    }
}

/// Load every collection (seeding where empty) and build the report.
pub fn report<S: KeyValueStore>(store: &Store<S>, clock: &dyn Clock) -> ProgressReport {
    let goals = store.load_records::<Goal>(clock);
    let habits = store.load_records::<Habit>(clock);
    let areas = store.load_records::<LifeArea>(clock);
    let money = store.load_records::<MoneyGoal>(clock);
    let letters = store.load_records::<Letter>(clock);
    let destinations = store.load_records::<Destination>(clock);
    let tasks = store.load_records::<PlannerTask>(clock);
    let journal = store.load_records::<JournalEntry>(clock);
    build(
        Snapshot {
            goals: &goals,
            habits: &habits,
            areas: &areas,
            money: &money,
            letters: &letters,
            destinations: &destinations,
            tasks: &tasks,
            journal: &journal,
        },
        clock.today(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;

    #[test]
    fn seeded_report() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let store = Store::new(MemoryStore::new());
        let r = report(&store, &FixedClock::on(today));
        assert_eq!(r.goals.total, 2);
        assert_eq!(r.goals.average_progress, 38);
        assert_eq!(r.habits.consistency, 48);
        assert_eq!(r.habits.longest_streak, 5);
        assert_eq!(r.life_balance, 5);
        assert_eq!(r.letters.locked, 1);
        assert_eq!(r.travel.total, 0);
        assert_eq!(r.today.total, 3);
        assert_eq!(r.average_mood, Some(4));
        assert_eq!(r.money.total_saved, 9600.0);
    }

    #[test]
    fn empty_collections_report_zeros() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let r = build(
            Snapshot {
                goals: &[],
                habits: &[],
                areas: &[],
                money: &[],
                letters: &[],
                destinations: &[],
                tasks: &[],
                journal: &[],
            },
            today,
        );
        assert_eq!(r.goals.average_progress, 0);
        assert_eq!(r.habits.consistency, 0);
        assert_eq!(r.habits.longest_streak, 0);
        assert_eq!(r.life_balance_percent, 0);
        assert_eq!(r.money.total_progress, 0.0);
        assert_eq!(r.today.percent, 0);
        assert_eq!(r.average_mood, None);
    }
}
