use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft, Patch};
use crate::error::{require_text, ValidationError};
use crate::metrics;
use crate::paths;
use crate::types::GoalStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Career";
pub const MAX_PROGRESS: u8 = 100;

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Milestone {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub why: String,
    /// Self-reported progress, 0..=100.
    #[serde(default)]
    pub progress: u8,
    pub status: GoalStatus,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Goal {
    /// Share of milestones ticked off.
    pub fn milestone_progress(&self) -> u32 {
        let done = metrics::count_where(&self.milestones, |m| m.completed);
        metrics::percent_of(done, self.milestones.len())
    }

    pub fn days_to_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|d| metrics::days_remaining(d, today))
    }
}

impl Record for Goal {
    const SLOT: &'static str = paths::SLOT_DREAM_GOALS;
    const KIND: &'static str = "goal";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(today: NaiveDate) -> Vec<Self> {
        let end_of = |months: u32| today.checked_add_months(chrono::Months::new(months));
        vec![
            Goal {
                id: 1,
                title: "Master AI & ML".into(),
                category: "AI".into(),
                deadline: end_of(12),
                why: "To build innovative solutions and stay ahead in tech".into(),
                progress: 45,
                status: GoalStatus::InProgress,
                milestones: vec![
                    Milestone {
                        text: "Complete Python fundamentals".into(),
                        completed: true,
                    },
                    Milestone {
                        text: "Learn machine learning basics".into(),
                        completed: true,
                    },
                    Milestone::new("Build 3 ML projects"),
                    Milestone::new("Get ML certification"),
                ],
            },
            Goal {
                id: 2,
                title: "Design 10 UI Kits".into(),
                category: "Design".into(),
                deadline: end_of(6),
                why: "Build a portfolio of design work and income stream".into(),
                progress: 30,
                status: GoalStatus::InProgress,
                milestones: vec![
                    Milestone {
                        text: "Complete 2 UI kits".into(),
                        completed: true,
                    },
                    Milestone::new("Get 500+ downloads"),
                    Milestone::new("Create tutorial series"),
                ],
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Draft / Patch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GoalDraft {
    pub title: String,
    pub category: String,
    pub deadline: Option<NaiveDate>,
    pub why: String,
    pub progress: u8,
    pub status: GoalStatus,
    pub milestones: Vec<Milestone>,
}

impl GoalDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for GoalDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            deadline: None,
            why: String::new(),
            progress: 0,
            status: GoalStatus::Dreaming,
            milestones: Vec::new(),
        }
    }
}

impl Draft for GoalDraft {
    type Record = Goal;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }

    fn into_record(self, id: RecordId, _clock: &dyn Clock) -> Goal {
        Goal {
            id,
            title: self.title.trim().to_string(),
            category: self.category,
            deadline: self.deadline,
            why: self.why,
            progress: self.progress.min(MAX_PROGRESS),
            status: self.status,
            milestones: self.milestones,
        }
    }
}

/// Edit-form changes; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` clears the deadline.
    pub deadline: Option<Option<NaiveDate>>,
    pub why: Option<String>,
    pub progress: Option<u8>,
    pub status: Option<GoalStatus>,
}

impl Patch<Goal> for GoalPatch {
    fn apply(self, goal: &mut Goal) -> Result<(), ValidationError> {
        if let Some(title) = self.title {
            require_text("title", &title)?;
            goal.title = title.trim().to_string();
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = deadline;
        }
        if let Some(why) = self.why {
            goal.why = why;
        }
        if let Some(progress) = self.progress {
            goal.progress = progress.min(MAX_PROGRESS);
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Milestone edits
// ---------------------------------------------------------------------------

pub fn add_milestone(
    goals: &Collection<Goal>,
    id: RecordId,
    text: &str,
) -> Result<(Collection<Goal>, bool), ValidationError> {
    require_text("milestone", text)?;
    Ok(editor::modify(goals, id, |goal: &mut Goal| {
        goal.milestones.push(Milestone::new(text.trim()))
    }))
}

/// Flip milestone `index` (0-based). `false` when the goal or index is unknown.
pub fn toggle_milestone(
    goals: &Collection<Goal>,
    id: RecordId,
    index: usize,
) -> (Collection<Goal>, bool) {
    let in_range = goals.get(id).is_some_and(|g| index < g.milestones.len());
    if !in_range {
        return (goals.clone(), false);
    }
    editor::modify(goals, id, |goal: &mut Goal| {
        let m = &mut goal.milestones[index];
        m.completed = !m.completed;
    })
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

pub fn average_progress(goals: &[Goal]) -> u32 {
    metrics::average_by(goals, |g| f64::from(g.progress))
}

pub fn count_with_status(goals: &[Goal], status: GoalStatus) -> usize {
    metrics::count_where(goals, |g| g.status == status)
}

pub fn achieved_count(goals: &[Goal]) -> usize {
    count_with_status(goals, GoalStatus::Achieved)
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

    fn seeded() -> Collection<Goal> {
        Goal::seed(today()).into()
    }

    #[test]
    fn create_requires_title() {
        let err = editor::create(&seeded(), GoalDraft::new(""), &FixedClock::on(today()))
            .unwrap_err();
        assert_eq!(err, ValidationError::Blank { field: "title" });
    }

    #[test]
    fn create_clamps_progress_and_defaults_status() {
        let draft = GoalDraft {
            progress: 250,
            ..GoalDraft::new("Run a marathon")
        };
        let (goals, goal) = editor::create(&seeded(), draft, &FixedClock::on(today())).unwrap();
        assert_eq!(goal.progress, 100);
        assert_eq!(goal.status, GoalStatus::Dreaming);
        assert_eq!(goal.category, "Career");
        assert_eq!(goals.last(), Some(&goal));
    }

    #[test]
    fn patch_updates_selected_fields() {
        let patch = GoalPatch {
            status: Some(GoalStatus::Achieved),
            progress: Some(100),
            deadline: Some(None),
            ..GoalPatch::default()
        };
        let (goals, found) = editor::update(&seeded(), 2, patch).unwrap();
        assert!(found);
        let goal = goals.get(2).unwrap();
        assert_eq!(goal.status, GoalStatus::Achieved);
        assert_eq!(goal.progress, 100);
        assert_eq!(goal.deadline, None);
        assert_eq!(goal.title, "Design 10 UI Kits");
    }

    #[test]
    fn patch_refuses_blank_title() {
        let patch = GoalPatch {
            title: Some(" ".into()),
            ..GoalPatch::default()
        };
        assert!(editor::update(&seeded(), 1, patch).is_err());
    }

    #[test]
    fn milestones_can_be_added_and_toggled() {
        let (goals, found) = add_milestone(&seeded(), 2, "Launch a store").unwrap();
        assert!(found);
        assert_eq!(goals.get(2).unwrap().milestones.len(), 4);

        let (goals, found) = toggle_milestone(&goals, 2, 3);
        assert!(found);
        assert!(goals.get(2).unwrap().milestones[3].completed);
        assert_eq!(goals.get(2).unwrap().milestone_progress(), 50);

        let (_, found) = toggle_milestone(&goals, 2, 10);
        assert!(!found);
    }

    #[test]
    fn average_progress_and_achieved() {
        let goals = seeded();
        assert_eq!(average_progress(&goals), 38);
        assert_eq!(achieved_count(&goals), 0);
        assert_eq!(average_progress(&[]), 0);
    }

    #[test]
    fn goal_json_shape() {
        let json = serde_json::to_value(&seeded()[0]).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["milestones"][0]["completed"], true);
    }
}
