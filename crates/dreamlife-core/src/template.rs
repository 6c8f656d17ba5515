//! Bundled starter plans. Applying one appends its goals and habits to the
//! user's collections.

use crate::clock::Clock;
use crate::collection::{RecordId, Store};
use crate::editor;
use crate::error::{DreamlifeError, Result};
use crate::goal::{Goal, GoalDraft};
use crate::habit::{Habit, HabitDraft};
use crate::storage::KeyValueStore;
use crate::types::GoalStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateGoal {
    pub title: &'static str,
    pub category: &'static str,
    pub why: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateHabit {
    pub name: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub goals: &'static [TemplateGoal],
    pub habits: &'static [TemplateHabit],
}

const fn goal(title: &'static str, category: &'static str, why: &'static str) -> TemplateGoal {
    TemplateGoal {
        title,
        category,
        why,
    }
}

const fn habit(name: &'static str, category: &'static str) -> TemplateHabit {
    TemplateHabit { name, category }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        slug: "life-reset",
        name: "Life Reset Template",
        description: "Start fresh with a comprehensive life reset plan",
        icon: "🔄",
        goals: &[
            goal("Reflect on past year", "Personal Growth", "Understand what worked and what didn't"),
            goal("Define core values", "Personal Growth", "Align actions with what truly matters"),
            goal("Set quarterly goals", "Career", "Create a roadmap for the next 3 months"),
        ],
        habits: &[
            habit("Daily reflection", "Mindfulness"),
            habit("Morning journaling", "Mindfulness"),
            habit("Weekly planning", "Productivity"),
        ],
    },
    Template {
        slug: "five-year-plan",
        name: "5-Year Life Plan",
        description: "Build a comprehensive 5-year vision for your life",
        icon: "🗺️",
        goals: &[
            goal("Career milestone", "Career", "Advance in my field and gain expertise"),
            goal("Financial goal", "Finance", "Build wealth and financial security"),
            goal("Health transformation", "Health", "Be strong and fit"),
            goal("Relationship goals", "Relationships", "Build meaningful connections"),
        ],
        habits: &[
            habit("Monthly goal review", "Planning"),
            habit("Quarterly check-ins", "Reflection"),
        ],
    },
    Template {
        slug: "dream-career",
        name: "Dream Career Roadmap",
        description: "Chart your path to your dream career",
        icon: "🎯",
        goals: &[
            goal("Learn required skills", "Learning", "Get the expertise needed for my dream role"),
            goal("Build portfolio", "Career", "Showcase my best work"),
            goal("Network in industry", "Career", "Connect with mentors and peers"),
            goal("Land dream job", "Career", "Achieve my career goal"),
        ],
        habits: &[
            habit("Study industry trends", "Learning"),
            habit("Network weekly", "Career"),
            habit("Side project work", "Skill-building"),
        ],
    },
    Template {
        slug: "glow-up",
        name: "Glow-Up Plan",
        description: "Personal transformation in all areas of life",
        icon: "✨",
        goals: &[
            goal("Physical transformation", "Health", "Feel strong and confident"),
            goal("Skill development", "Learning", "Become more capable"),
            goal("Mind & confidence", "Personal Growth", "Build self-belief"),
            goal("Style & presence", "Lifestyle", "Present my best self"),
        ],
        habits: &[
            habit("Daily workout", "Health"),
            habit("Skill practice", "Learning"),
            habit("Meditation", "Mindfulness"),
            habit("Skincare routine", "Self-care"),
        ],
    },
    Template {
        slug: "study-growth",
        name: "Study & Skill Growth Plan",
        description: "Master a new skill or complete your studies",
        icon: "🎓",
        goals: &[
            goal("Complete course", "Learning", "Gain comprehensive knowledge"),
            goal("Build projects", "Learning", "Apply learning practically"),
            goal("Master fundamentals", "Learning", "Build strong foundation"),
        ],
        habits: &[
            habit("Study time daily", "Learning"),
            habit("Practice exercises", "Learning"),
            habit("Review notes", "Learning"),
        ],
    },
    Template {
        slug: "fitness",
        name: "Fitness Transformation Plan",
        description: "Get fit and build healthy habits",
        icon: "💪",
        goals: &[
            goal("Build consistent routine", "Health", "Exercise regularly"),
            goal("Achieve fitness goal", "Health", "Reach target fitness level"),
            goal("Improve nutrition", "Health", "Eat healthier"),
        ],
        habits: &[
            habit("Workout routine", "Fitness"),
            habit("Meal prep", "Nutrition"),
            habit("Track calories", "Health"),
            habit("Sleep 8 hours", "Health"),
        ],
    },
];

/// Look a template up by slug, 1-based catalog position or name.
pub fn find(key: &str) -> Result<&'static Template> {
    let key = key.trim();
    let by_position = key
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| TEMPLATES.get(i));
    by_position
        .or_else(|| {
            TEMPLATES
                .iter()
                .find(|t| t.slug == key || t.name.eq_ignore_ascii_case(key))
        })
        .ok_or_else(|| DreamlifeError::TemplateNotFound(key.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Applied {
    pub goals: Vec<RecordId>,
    pub habits: Vec<RecordId>,
}

/// Append the template's goals (dreaming, 0%) and habits. Goals and habits
/// are saved as two separate writes; a failure on the second leaves the
/// first in place.
pub fn apply<S: KeyValueStore>(
    store: &mut Store<S>,
    template: &Template,
    clock: &dyn Clock,
) -> Result<Applied> {
    let mut applied = Applied::default();

    let mut goals = store.load_records::<Goal>(clock);
    for g in template.goals {
        let draft = GoalDraft {
            category: g.category.to_string(),
            why: g.why.to_string(),
            status: GoalStatus::Dreaming,
            ..GoalDraft::new(g.title)
        };
        let (next, created) = editor::create(&goals, draft, clock)?;
        applied.goals.push(created.id);
        goals = next;
    }
    store.save_records(&goals)?;

    let mut habits = store.load_records::<Habit>(clock);
    for h in template.habits {
        let draft = HabitDraft {
            category: h.category.to_string(),
            ..HabitDraft::new(h.name)
        };
        let (next, created) = editor::create(&habits, draft, clock)?;
        applied.habits.push(created.id);
        habits = next;
    }
    store.save_records(&habits)?;

    tracing::debug!(
        template = template.slug,
        goals = applied.goals.len(),
        habits = applied.habits.len(),
        "applied template"
    );
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn catalog_has_six_plans() {
        assert_eq!(TEMPLATES.len(), 6);
        let slugs: std::collections::HashSet<_> = TEMPLATES.iter().map(|t| t.slug).collect();
        assert_eq!(slugs.len(), 6);
    }

    #[test]
    fn find_by_slug_position_or_name() {
        assert_eq!(find("glow-up").unwrap().name, "Glow-Up Plan");
        assert_eq!(find("1").unwrap().slug, "life-reset");
        assert_eq!(find("fitness transformation plan").unwrap().slug, "fitness");
        assert!(matches!(find("0"), Err(DreamlifeError::TemplateNotFound(_))));
        assert!(find("nope").is_err());
    }

    #[test]
    fn apply_appends_goals_and_habits() {
        let mut store = Store::new(MemoryStore::new());
        let c = clock();
        let template = find("fitness").unwrap();
        let applied = apply(&mut store, template, &c).unwrap();
        assert_eq!(applied.goals.len(), 3);
        assert_eq!(applied.habits.len(), 4);

        let goals = store.load_records::<Goal>(&c);
        // Two seeded goals plus the template's three.
        assert_eq!(goals.len(), 5);
        let added = goals.get(applied.goals[0]).unwrap();
        assert_eq!(added.title, "Build consistent routine");
        assert_eq!(added.status, GoalStatus::Dreaming);
        assert_eq!(added.progress, 0);

        let habits = store.load_records::<Habit>(&c);
        assert_eq!(habits.len(), 7);
        assert!(habits.has_unique_ids());
        assert_eq!(habits.get(applied.habits[3]).unwrap().name, "Sleep 8 hours");
    }
}
