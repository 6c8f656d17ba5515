use crate::collection::{Collection, Record, RecordId};
use crate::editor;
use crate::metrics;
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeArea {
    pub id: RecordId,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub vision: String,
    /// Self-assessed, 1..=10.
    pub current_level: u8,
    #[serde(default)]
    pub improvement_plan: String,
}

impl Record for LifeArea {
    const SLOT: &'static str = paths::SLOT_LIFE_AREAS;
    const KIND: &'static str = "life area";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        const AREAS: [(&str, &str, &str, u8, &str); 7] = [
            (
                "Career & Skills",
                "💼",
                "Build expertise in AI and design, leading projects that make impact",
                6,
                "Learn 1 new AI framework monthly, contribute to open source projects",
            ),
            (
                "Health & Fitness",
                "💪",
                "Strong, energetic, and healthy with a consistent exercise routine",
                5,
                "Workout 4 times a week, focus on strength training and cardio",
            ),
            (
                "Finance",
                "💰",
                "Financial freedom with multiple income streams and solid savings",
                4,
                "Save 30% of income monthly, invest in high-yield opportunities",
            ),
            (
                "Learning",
                "🧠",
                "Continuous growth through reading, courses, and practical projects",
                7,
                "Read 1 book per month, take 1 online course quarterly",
            ),
            (
                "Relationships",
                "❤️",
                "Deep, meaningful connections with family and friends",
                6,
                "Weekly calls with loved ones, monthly meet-ups with friends",
            ),
            (
                "Creativity",
                "🎨",
                "Express creativity through design, writing, and art",
                5,
                "Create 1 design project weekly, journaling 3 times per week",
            ),
            (
                "Lifestyle",
                "🌍",
                "Travel, experience new cultures, and live intentionally",
                4,
                "Plan 1 trip per quarter, experience local culture monthly",
            ),
        ];
        AREAS
            .iter()
            .zip(1..)
            .map(|(&(name, icon, vision, level, plan), id)| LifeArea {
                id,
                name: name.to_string(),
                icon: icon.to_string(),
                vision: vision.to_string(),
                current_level: level,
                improvement_plan: plan.to_string(),
            })
            .collect()
    }
}

pub fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

#[derive(Debug, Clone, Default)]
pub struct LifeAreaPatch {
    pub vision: Option<String>,
    pub level: Option<u8>,
    pub plan: Option<String>,
}

impl LifeAreaPatch {
    /// Every field is free text or clamped, so this cannot be refused.
    pub fn apply_to(self, area: &mut LifeArea) {
        if let Some(vision) = self.vision {
            area.vision = vision;
        }
        if let Some(level) = self.level {
            area.current_level = clamp_level(level);
        }
        if let Some(plan) = self.plan {
            area.improvement_plan = plan;
        }
    }
}

pub fn update(
    areas: &Collection<LifeArea>,
    id: RecordId,
    patch: LifeAreaPatch,
) -> (Collection<LifeArea>, bool) {
    editor::modify(areas, id, |area: &mut LifeArea| patch.apply_to(area))
}

/// Find an area by id, or by case-insensitive name.
pub fn find<'a>(areas: &'a [LifeArea], key: &str) -> Option<&'a LifeArea> {
    if let Ok(id) = key.parse::<RecordId>() {
        return areas.iter().find(|a| a.id == id);
    }
    areas.iter().find(|a| a.name.eq_ignore_ascii_case(key.trim()))
}

/// Rounded mean level, 0 with no areas.
pub fn overall_balance(areas: &[LifeArea]) -> u32 {
    metrics::average_by(areas, |a| f64::from(a.current_level))
}

/// [`overall_balance`] on a 0..=100 scale.
pub fn balance_percent(areas: &[LifeArea]) -> u32 {
    overall_balance(areas) * 10
}
