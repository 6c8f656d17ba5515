//! Daily reflection: one journal entry per calendar date.

use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_MOOD: u8 = 5;
pub const DEFAULT_MOOD: u8 = 3;
pub const MOOD_LABELS: [&str; 6] = ["Terrible", "Bad", "Okay", "Good", "Great", "Amazing"];
pub const MOOD_EMOJIS: [&str; 6] = ["😢", "😕", "😐", "🙂", "😊", "😄"];

pub fn mood_label(mood: u8) -> &'static str {
    MOOD_LABELS[usize::from(mood.min(MAX_MOOD))]
}

pub fn mood_emoji(mood: u8) -> &'static str {
    MOOD_EMOJIS[usize::from(mood.min(MAX_MOOD))]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(default)]
    pub journal_entry: String,
    /// Index into [`MOOD_LABELS`].
    #[serde(default = "default_mood")]
    pub mood: u8,
    #[serde(default)]
    pub gratitude: Vec<String>,
    #[serde(default)]
    pub lessons_learned: Vec<String>,
}

fn default_mood() -> u8 {
    DEFAULT_MOOD
}

impl Record for JournalEntry {
    const SLOT: &'static str = paths::SLOT_REFLECTION;
    const KIND: &'static str = "journal entry";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(today: NaiveDate) -> Vec<Self> {
        vec![JournalEntry {
            id: 1,
            date: today,
            journal_entry: "Started learning deep learning today. It's challenging but exciting!"
                .into(),
            mood: 4,
            gratitude: vec![
                "Morning coffee".into(),
                "A good conversation with a friend".into(),
                "Making progress on my goals".into(),
            ],
            lessons_learned: vec![
                "Consistency matters more than perfection".into(),
                "Small steps add up to big results".into(),
            ],
        }]
    }
}

/// What the reflection form submits for one date.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub date: NaiveDate,
    pub text: String,
    pub mood: u8,
    pub gratitude: Vec<String>,
    pub lessons: Vec<String>,
}

impl EntryForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            text: String::new(),
            mood: DEFAULT_MOOD,
            gratitude: Vec::new(),
            lessons: Vec::new(),
        }
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Insert or replace the entry for `form.date`. An existing entry keeps its
/// id and position. Returns the new collection, the saved entry and whether
/// it was newly created.
pub fn save_entry(
    entries: &Collection<JournalEntry>,
    form: EntryForm,
    clock: &dyn Clock,
) -> (Collection<JournalEntry>, JournalEntry, bool) {
    let existing = entry_for(entries, form.date).map(|e| e.id);
    let id = existing.unwrap_or_else(|| entries.next_id(clock.now().timestamp_millis()));
    let entry = JournalEntry {
        id,
        date: form.date,
        journal_entry: form.text,
        mood: form.mood.min(MAX_MOOD),
        gratitude: non_blank(form.gratitude),
        lessons_learned: non_blank(form.lessons),
    };

    let mut next = entries.clone();
    match next.get_mut(id) {
        Some(slot) => *slot = entry.clone(),
        None => next.push(entry.clone()),
    }
    (next, entry, existing.is_none())
}

pub fn entry_for(entries: &[JournalEntry], date: NaiveDate) -> Option<&JournalEntry> {
    entries.iter().find(|e| e.date == date)
}

/// Rounded mean mood, `None` without entries.
pub fn average_mood(entries: &[JournalEntry]) -> Option<u8> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.mood.min(MAX_MOOD))).sum();
    let mean = (f64::from(total) / entries.len() as f64).round();
    Some(mean as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn seeded() -> Collection<JournalEntry> {
        JournalEntry::seed(today()).into()
    }

    #[test]
    fn saving_same_date_keeps_id() {
        let clock = FixedClock::on(today());
        let form = EntryForm {
            text: "Rewrote it".into(),
            mood: 9,
            gratitude: vec!["sun".into(), "  ".into(), String::new()],
            lessons: vec!["".into(), "sleep early".into()],
            ..EntryForm::new(today())
        };
        let (entries, entry, created) = save_entry(&seeded(), form, &clock);
        assert!(!created);
        assert_eq!(entries.len(), 1);
        assert_eq!(entry.id, 1);
        assert_eq!(entry.mood, MAX_MOOD);
        assert_eq!(entry.gratitude, vec!["sun".to_string()]);
        assert_eq!(entry.lessons_learned, vec!["sleep early".to_string()]);
    }

    #[test]
    fn new_date_appends() {
        let clock = FixedClock::on(today());
        let tomorrow = today() + chrono::Duration::days(1);
        let (entries, entry, created) = save_entry(&seeded(), EntryForm::new(tomorrow), &clock);
        assert!(created);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], entry);
        assert_eq!(entry_for(&entries, tomorrow).map(|e| e.id), Some(entry.id));
    }

    #[test]
    fn average_mood_rounds() {
        let clock = FixedClock::on(today());
        let sad = EntryForm {
            mood: 1,
            ..EntryForm::new(today() - chrono::Duration::days(1))
        };
        let (entries, _, _) = save_entry(&seeded(), sad, &clock);
        // (4 + 1) / 2 = 2.5
        assert_eq!(average_mood(&entries), Some(3));
        assert_eq!(average_mood(&[]), None);
        assert_eq!(mood_label(3), "Good");
        assert_eq!(mood_label(42), "Amazing");
    }
}
