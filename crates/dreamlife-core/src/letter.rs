//! Letters to a future self.
//!
//! A letter starts `Locked` when its unlock date is still ahead on the day it
//! is written. It becomes `Unlocked` once that date arrives and stays that
//! way: [`Letter::refresh`] latches the transition so a clock that moves
//! backwards cannot lock it again.

use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft};
use crate::error::{require_text, DreamlifeError, Result, ValidationError};
use crate::metrics;
use crate::paths;
use crate::types::LetterState;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub written_on: NaiveDate,
    pub unlock_date: NaiveDate,
    pub state: LetterState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_on: Option<NaiveDate>,
}

impl Letter {
    pub fn is_locked(&self, today: NaiveDate) -> bool {
        self.state == LetterState::Locked && self.unlock_date > today
    }

    /// Latch `Locked -> Unlocked` once the unlock date has arrived.
    /// Returns true if the state changed.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        if self.state == LetterState::Locked && !self.is_locked(today) {
            self.state = LetterState::Unlocked;
            return true;
        }
        false
    }

    /// Signed days until the unlock date.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        metrics::days_remaining(self.unlock_date, today)
    }

    pub fn is_unread(&self, today: NaiveDate) -> bool {
        !self.is_locked(today) && self.opened_on.is_none()
    }
}

impl Record for Letter {
    const SLOT: &'static str = paths::SLOT_LETTERS;
    const KIND: &'static str = "letter";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(today: NaiveDate) -> Vec<Self> {
        vec![
            Letter {
                id: 1,
                title: "To My Future Self - Next Year".into(),
                content: "I hope by next year you will have achieved...".into(),
                written_on: today,
                unlock_date: today + Duration::days(365),
                state: LetterState::Locked,
                opened_on: None,
            },
            Letter {
                id: 2,
                title: "When I feel discouraged".into(),
                content: "Remember why you started. You are stronger than you think.".into(),
                written_on: today - Duration::days(36),
                unlock_date: today - Duration::days(5),
                state: LetterState::Unlocked,
                opened_on: Some(today - Duration::days(5)),
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LetterDraft {
    pub title: String,
    pub content: String,
    pub unlock_date: Option<NaiveDate>,
}

impl Draft for LetterDraft {
    type Record = Letter;

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        if self.unlock_date.is_none() {
            return Err(ValidationError::Missing {
                field: "unlock date",
            });
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, clock: &dyn Clock) -> Letter {
        let today = clock.today();
        let unlock_date = self.unlock_date.unwrap_or(today);
        let state = if unlock_date > today {
            LetterState::Locked
        } else {
            LetterState::Unlocked
        };
        Letter {
            id,
            title: self.title.trim().to_string(),
            content: self.content,
            written_on: today,
            unlock_date,
            state,
            opened_on: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Apply [`Letter::refresh`] to every letter. Returns how many unlocked.
pub fn refresh_all(letters: &Collection<Letter>, today: NaiveDate) -> (Collection<Letter>, usize) {
    let mut unlocked = 0;
    let next = letters
        .iter()
        .cloned()
        .map(|mut letter| {
            if letter.refresh(today) {
                unlocked += 1;
            }
            letter
        })
        .collect();
    (next, unlocked)
}

/// Open a letter for reading. Refused while it is still locked; the first
/// successful read records `opened_on`.
pub fn open(
    letters: &Collection<Letter>,
    id: RecordId,
    today: NaiveDate,
) -> Result<(Collection<Letter>, Letter)> {
    let letter = letters.get(id).ok_or(DreamlifeError::RecordNotFound {
        kind: Letter::KIND,
        id,
    })?;
    if letter.is_locked(today) {
        return Err(DreamlifeError::LetterLocked {
            id,
            days: letter.days_until(today),
        });
    }
    let (next, _) = editor::modify(letters, id, |l: &mut Letter| {
        l.refresh(today);
        l.opened_on.get_or_insert(today);
    });
    let opened = next.get(id).cloned().ok_or(DreamlifeError::RecordNotFound {
        kind: Letter::KIND,
        id,
    })?;
    Ok((next, opened))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterStats {
    pub total: usize,
    pub locked: usize,
    pub unlocked: usize,
    pub unread: usize,
}

pub fn stats(letters: &[Letter], today: NaiveDate) -> LetterStats {
    let locked = metrics::count_where(letters, |l| l.is_locked(today));
    LetterStats {
        total: letters.len(),
        locked,
        unlocked: letters.len() - locked,
        unread: metrics::count_where(letters, |l| l.is_unread(today)),
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

    fn draft(days_ahead: i64) -> LetterDraft {
        LetterDraft {
            title: "Dear me".into(),
            content: "Keep going.".into(),
            unlock_date: Some(today() + Duration::days(days_ahead)),
        }
    }

    #[test]
    fn letter_ten_days_out_is_locked_then_unlocks_for_good() {
        let clock = FixedClock::on(today());
        let (letters, letter) =
            editor::create(&Collection::new(), draft(10), &clock).unwrap();
        assert!(letter.is_locked(today()));
        assert_eq!(letter.days_until(today()), 10);

        let unlock_day = clock.shifted(10).today();
        let (letters, changed) = refresh_all(&letters, unlock_day);
        assert_eq!(changed, 1);
        let letter = letters.get(letter.id).unwrap();
        assert!(!letter.is_locked(unlock_day));
        assert_eq!(letter.state, LetterState::Unlocked);

        // Clock moving back never locks it again.
        assert!(!letter.is_locked(today()));
        assert!(!letter.is_locked(today() - Duration::days(30)));
    }

    #[test]
    fn letter_due_today_starts_unlocked() {
        let (_, letter) =
            editor::create(&Collection::new(), draft(0), &FixedClock::on(today())).unwrap();
        assert_eq!(letter.state, LetterState::Unlocked);
        assert_eq!(letter.days_until(today()), 0);
    }

    #[test]
    fn draft_requires_title_content_and_date() {
        let clock = FixedClock::on(today());
        let empty = Collection::new();
        let missing_date = LetterDraft {
            unlock_date: None,
            ..draft(3)
        };
        assert_eq!(
            editor::create(&empty, missing_date, &clock).unwrap_err(),
            ValidationError::Missing {
                field: "unlock date"
            }
        );
        let blank = LetterDraft {
            content: "\n".into(),
            ..draft(3)
        };
        assert!(editor::create(&empty, blank, &clock).is_err());
    }

    #[test]
    fn opening_a_locked_letter_is_refused() {
        let letters: Collection<Letter> = Letter::seed(today()).into();
        let err = open(&letters, 1, today()).unwrap_err();
        assert!(matches!(err, DreamlifeError::LetterLocked { id: 1, days: 365 }));
    }

    #[test]
    fn opening_records_first_read() {
        let clock = FixedClock::on(today());
        let (letters, letter) = editor::create(&Collection::new(), draft(0), &clock).unwrap();
        assert!(letter.is_unread(today()));

        let later = today() + Duration::days(2);
        let (letters, opened) = open(&letters, letter.id, later).unwrap();
        assert_eq!(opened.opened_on, Some(later));

        let (_, again) = open(&letters, letter.id, later + Duration::days(1)).unwrap();
        assert_eq!(again.opened_on, Some(later));
    }

    #[test]
    fn opening_unknown_letter() {
        let err = open(&Collection::new(), 7, today()).unwrap_err();
        assert!(matches!(err, DreamlifeError::RecordNotFound { id: 7, .. }));
    }

    #[test]
    fn stats_count_lock_state() {
        let letters: Collection<Letter> = Letter::seed(today()).into();
        let s = stats(&letters, today());
        assert_eq!(
            s,
            LetterStats {
                total: 2,
                locked: 1,
                unlocked: 1,
                unread: 0
            }
        );
    }
}
