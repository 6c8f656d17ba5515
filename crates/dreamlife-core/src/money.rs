use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft, Patch};
use crate::error::{require_positive, require_text, ValidationError};
use crate::metrics;
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EMOJI: &str = "💰";
pub const DEFAULT_CATEGORY: &str = "goal";
pub const COLORS: [&str; 4] = ["lavender", "blue", "sage", "pink"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyGoal {
    pub id: RecordId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    pub target: f64,
    /// Never negative.
    #[serde(default)]
    pub saved: f64,
    pub deadline: NaiveDate,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

fn default_color() -> String {
    COLORS[1].to_string()
}

impl MoneyGoal {
    pub fn progress(&self) -> f64 {
        metrics::savings_progress(self.saved, self.target)
    }

    /// Days until the deadline, 0 once it has passed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        metrics::days_remaining_floored(self.deadline, today)
    }

    pub fn still_needed(&self) -> f64 {
        (self.target - self.saved).max(0.0)
    }
}

impl Record for MoneyGoal {
    const SLOT: &'static str = paths::SLOT_MONEY_GOALS;
    const KIND: &'static str = "money goal";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(today: NaiveDate) -> Vec<Self> {
        let months = |n: u32| {
            today
                .checked_add_months(chrono::Months::new(n))
                .unwrap_or(today)
        };
        vec![
            MoneyGoal {
                id: 1,
                name: "Japan Trip".into(),
                category: "travel".into(),
                emoji: "✈️".into(),
                target: 5000.0,
                saved: 2300.0,
                deadline: months(8),
                color: COLORS[0].into(),
            },
            MoneyGoal {
                id: 2,
                name: "Dream Setup (Gaming PC)".into(),
                category: "tech".into(),
                emoji: "🎮".into(),
                target: 2000.0,
                saved: 800.0,
                deadline: months(14),
                color: COLORS[1].into(),
            },
            MoneyGoal {
                id: 3,
                name: "Emergency Fund".into(),
                category: "security".into(),
                emoji: "🛡️".into(),
                target: 10000.0,
                saved: 6500.0,
                deadline: months(15),
                color: COLORS[2].into(),
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Draft / Patch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MoneyGoalDraft {
    pub name: String,
    pub target: f64,
    pub deadline: Option<NaiveDate>,
    pub emoji: String,
}

impl MoneyGoalDraft {
    pub fn new(name: impl Into<String>, target: f64, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            target,
            deadline: Some(deadline),
            emoji: DEFAULT_EMOJI.to_string(),
        }
    }
}

impl Draft for MoneyGoalDraft {
    type Record = MoneyGoal;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_positive("target", self.target)?;
        if self.deadline.is_none() {
            return Err(ValidationError::Missing { field: "deadline" });
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, clock: &dyn Clock) -> MoneyGoal {
        MoneyGoal {
            id,
            name: self.name.trim().to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            emoji: self.emoji,
            target: self.target,
            saved: 0.0,
            deadline: self.deadline.unwrap_or_else(|| clock.today()),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoneyGoalPatch {
    pub name: Option<String>,
    pub target: Option<f64>,
    /// Clamped to be non-negative.
    pub saved: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub emoji: Option<String>,
}

impl Patch<MoneyGoal> for MoneyGoalPatch {
    fn apply(self, goal: &mut MoneyGoal) -> Result<(), ValidationError> {
        if let Some(name) = self.name {
            require_text("name", &name)?;
            goal.name = name.trim().to_string();
        }
        if let Some(target) = self.target {
            require_positive("target", target)?;
            goal.target = target;
        }
        if let Some(saved) = self.saved {
            goal.saved = clamp_saved(saved);
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = deadline;
        }
        if let Some(emoji) = self.emoji {
            goal.emoji = emoji;
        }
        Ok(())
    }
}

fn clamp_saved(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.max(0.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Add a deposit. Only positive, finite amounts are accepted.
pub fn add_savings(
    goals: &Collection<MoneyGoal>,
    id: RecordId,
    amount: f64,
) -> Result<(Collection<MoneyGoal>, bool), ValidationError> {
    require_positive("amount", amount)?;
    Ok(editor::modify(goals, id, |g: &mut MoneyGoal| {
        g.saved = clamp_saved(g.saved + amount)
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoneySummary {
    pub total_target: f64,
    pub total_saved: f64,
    /// Overall saved/target percentage, 0 with no target.
    pub total_progress: f64,
}

pub fn summary(goals: &[MoneyGoal]) -> MoneySummary {
    let total_target = metrics::sum_by(goals, |g| g.target);
    let total_saved = metrics::sum_by(goals, |g| g.saved);
    let total_progress = if total_target > 0.0 {
        total_saved / total_target * 100.0
    } else {
        0.0
    };
    MoneySummary {
        total_target,
        total_saved,
        total_progress,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn japan_only() -> Collection<MoneyGoal> {
        vec![MoneyGoal::seed(today()).remove(0)].into()
    }

    #[test]
    fn adding_200_to_2300_of_5000_is_half_way() {
        let (goals, found) = add_savings(&japan_only(), 1, 200.0).unwrap();
        assert!(found);
        let goal = goals.get(1).unwrap();
        assert_eq!(goal.saved, 2500.0);
        assert_eq!(goal.progress(), 50.0);
        assert_eq!(goal.still_needed(), 2500.0);
    }

    #[test]
    fn non_positive_deposits_are_refused() {
        for amount in [0.0, -10.0, f64::NAN] {
            assert_eq!(
                add_savings(&japan_only(), 1, amount).unwrap_err(),
                ValidationError::NotPositive { field: "amount" }
            );
        }
    }

    #[test]
    fn saved_is_clamped_non_negative() {
        let patch = MoneyGoalPatch {
            saved: Some(-50.0),
            ..MoneyGoalPatch::default()
        };
        let (goals, _) = editor::update(&japan_only(), 1, patch).unwrap();
        assert_eq!(goals.get(1).unwrap().saved, 0.0);
    }

    #[test]
    fn create_validates_and_starts_at_zero() {
        let clock = FixedClock::on(today());
        let deadline = today() + chrono::Duration::days(90);
        let bad = MoneyGoalDraft::new("Bike", 0.0, deadline);
        assert!(editor::create(&japan_only(), bad, &clock).is_err());

        let no_date = MoneyGoalDraft {
            deadline: None,
            ..MoneyGoalDraft::new("Bike", 800.0, deadline)
        };
        assert_eq!(
            editor::create(&japan_only(), no_date, &clock).unwrap_err(),
            ValidationError::Missing { field: "deadline" }
        );

        let (_, goal) =
            editor::create(&japan_only(), MoneyGoalDraft::new("Bike", 800.0, deadline), &clock)
                .unwrap();
        assert_eq!(goal.saved, 0.0);
        assert_eq!(goal.days_remaining(today()), 90);
    }

    #[test]
    fn days_remaining_floors_at_zero() {
        let mut goal = japan_only()[0].clone();
        goal.deadline = today() - chrono::Duration::days(3);
        assert_eq!(goal.days_remaining(today()), 0);
    }

    #[test]
    fn totals_and_empty_summary() {
        let goals: Collection<MoneyGoal> = MoneyGoal::seed(today()).into();
        let s = summary(&goals);
        assert_eq!(s.total_target, 17000.0);
        assert_eq!(s.total_saved, 9600.0);
        assert!((s.total_progress - 56.47).abs() < 0.01);

        let empty = summary(&[]);
        assert_eq!(empty.total_progress, 0.0);
    }

    #[test]
    fn zero_target_progress_is_zero() {
        let mut goal = japan_only()[0].clone();
        goal.target = 0.0;
        assert_eq!(goal.progress(), 0.0);
    }
}
