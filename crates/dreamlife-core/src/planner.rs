use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft};
use crate::error::{require_text, ValidationError};
use crate::habit::week_start;
use crate::metrics::{self, DAYS_IN_WEEK};
use crate::paths;
use crate::types::Priority;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerTask {
    pub id: RecordId,
    pub title: String,
    pub priority: Priority,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    /// Free-text name of the goal this task feeds into.
    #[serde(default)]
    pub linked_goal: String,
}

impl Record for PlannerTask {
    const SLOT: &'static str = paths::SLOT_PLANNER_TASKS;
    const KIND: &'static str = "task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(today: NaiveDate) -> Vec<Self> {
        let task = |id, title: &str, priority, completed, goal: &str| PlannerTask {
            id,
            title: title.to_string(),
            priority,
            date: today,
            completed,
            linked_goal: goal.to_string(),
        };
        vec![
            task(1, "Review AI basics course", Priority::High, false, "Master AI & ML"),
            task(2, "Sketch new UI component", Priority::Medium, false, "Design 10 UI Kits"),
            task(3, "Morning workout", Priority::High, true, "Stay Healthy"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub priority: Priority,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub linked_goal: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::Medium,
            date: None,
            linked_goal: String::new(),
        }
    }
}

impl Draft for TaskDraft {
    type Record = PlannerTask;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }

    fn into_record(self, id: RecordId, clock: &dyn Clock) -> PlannerTask {
        PlannerTask {
            id,
            title: self.title.trim().to_string(),
            priority: self.priority,
            date: self.date.unwrap_or_else(|| clock.today()),
            completed: false,
            linked_goal: self.linked_goal,
        }
    }
}

pub fn toggle(tasks: &Collection<PlannerTask>, id: RecordId) -> (Collection<PlannerTask>, bool) {
    editor::modify(tasks, id, |t: &mut PlannerTask| t.completed = !t.completed)
}

pub fn for_day(tasks: &[PlannerTask], day: NaiveDate) -> Vec<&PlannerTask> {
    tasks.iter().filter(|t| t.date == day).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub total: usize,
    pub completed: usize,
    pub high_priority: usize,
    pub percent: u32,
}

pub fn day_stats(tasks: &[PlannerTask], day: NaiveDate) -> DayStats {
    let today: Vec<&PlannerTask> = for_day(tasks, day);
    let completed = today.iter().filter(|t| t.completed).count();
    DayStats {
        date: day,
        total: today.len(),
        completed,
        high_priority: today.iter().filter(|t| t.priority == Priority::High).count(),
        percent: metrics::percent_of(completed, today.len()),
    }
}

/// Stats for Monday..Sunday of the week containing `day`.
pub fn week_overview(tasks: &[PlannerTask], day: NaiveDate) -> [DayStats; DAYS_IN_WEEK] {
    let monday = week_start(day);
    std::array::from_fn(|offset| day_stats(tasks, monday + Duration::days(offset as i64)))
}
