//! Create, update and delete over a collection, keyed by record id.
//!
//! All three operations read the input collection and return a new one;
//! persisting the result is the caller's job.

use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::error::ValidationError;

/// Form input for a new record.
pub trait Draft {
    type Record: Record;

    /// Refuse the draft before any id is spent on it.
    fn validate(&self) -> Result<(), ValidationError>;

    fn into_record(self, id: RecordId, clock: &dyn Clock) -> Self::Record;
}

/// Changes merged into an existing record.
pub trait Patch<R> {
    fn apply(self, record: &mut R) -> Result<(), ValidationError>;
}

impl<R, F> Patch<R> for F
where
    F: FnOnce(&mut R) -> Result<(), ValidationError>,
{
    fn apply(self, record: &mut R) -> Result<(), ValidationError> {
        self(record)
    }
}

/// Validate `draft`, give it a fresh id and append it.
pub fn create<D: Draft>(
    collection: &Collection<D::Record>,
    draft: D,
    clock: &dyn Clock,
) -> Result<(Collection<D::Record>, D::Record), ValidationError> {
    draft.validate()?;
    let id = collection.next_id(clock.now().timestamp_millis());
    let mut record = draft.into_record(id, clock);
    record.set_id(id);

    let mut next = collection.clone();
    next.push(record.clone());
    Ok((next, record))
}

/// Merge `patch` into the record with `id`. The id survives any patch.
/// Returns `false` alongside an unchanged copy when no record matches.
pub fn update<R: Record, P: Patch<R>>(
    collection: &Collection<R>,
    id: RecordId,
    patch: P,
) -> Result<(Collection<R>, bool), ValidationError> {
    let mut next = collection.clone();
    let Some(record) = next.get_mut(id) else {
        return Ok((next, false));
    };
    patch.apply(record)?;
    record.set_id(id);
    Ok((next, true))
}

/// Infallible in-place edit of the record with `id` (toggles, counters).
/// Same contract as [`update`].
pub fn modify<R: Record>(
    collection: &Collection<R>,
    id: RecordId,
    edit: impl FnOnce(&mut R),
) -> (Collection<R>, bool) {
    let mut next = collection.clone();
    let Some(record) = next.get_mut(id) else {
        return (next, false);
    };
    edit(record);
    record.set_id(id);
    (next, true)
}

/// Drop the record with `id`. Deleting an absent id is a no-op.
pub fn delete<R: Record>(collection: &Collection<R>, id: RecordId) -> Collection<R> {
    collection.iter().filter(|r| r.id() != id).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::require_text;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Idea {
        id: RecordId,
        title: String,
    }

    impl Record for Idea {
        const SLOT: &'static str = "ideas";
        const KIND: &'static str = "idea";

        fn id(&self) -> RecordId {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }
    }

    struct IdeaDraft(&'static str);

    impl Draft for IdeaDraft {
        type Record = Idea;

        fn validate(&self) -> Result<(), ValidationError> {
            require_text("title", self.0)
        }

        fn into_record(self, id: RecordId, _clock: &dyn Clock) -> Idea {
            Idea {
                id,
                title: self.0.to_string(),
            }
        }
    }

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    fn sample() -> Collection<Idea> {
        vec![
            Idea {
                id: 1,
                title: "one".into(),
            },
            Idea {
                id: 2,
                title: "two".into(),
            },
        ]
        .into()
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let ideas = sample();
        let (next, created) = create(&ideas, IdeaDraft("three"), &clock()).unwrap();
        assert_eq!(next.len(), 3);
        assert_eq!(next[2], created);
        assert!(!ideas.contains(created.id));
        assert_eq!(ideas.len(), 2, "input collection is untouched");
    }

    #[test]
    fn create_refuses_invalid_draft() {
        let err = create(&sample(), IdeaDraft("  "), &clock()).unwrap_err();
        assert_eq!(err, ValidationError::Blank { field: "title" });
    }

    #[test]
    fn create_then_delete_restores_collection() {
        let ideas = sample();
        let (next, created) = create(&ideas, IdeaDraft("temp"), &clock()).unwrap();
        assert_eq!(delete(&next, created.id), ideas);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let ideas = sample();
        let c = clock();
        let (next, first) = create(&ideas, IdeaDraft("a"), &c).unwrap();
        let (next, second) = create(&next, IdeaDraft("b"), &c).unwrap();
        let next = delete(&next, second.id);
        let (_, third) = create(&next, IdeaDraft("c"), &c.shifted(1)).unwrap();
        assert_ne!(third.id, second.id);
        assert_ne!(third.id, first.id);
    }

    #[test]
    fn update_merges_patch_and_keeps_id() {
        let (next, found) = update(
            &sample(),
            2,
            |idea: &mut Idea| -> Result<(), ValidationError> {
                idea.title = "TWO".into();
                idea.id = 99;
                Ok(())
            },
        )
        .unwrap();
        assert!(found);
        assert_eq!(next[1].id, 2);
        assert_eq!(next[1].title, "TWO");
    }

    #[test]
    fn update_missing_id_is_a_no_op() {
        let ideas = sample();
        let (next, found) = modify(&ideas, 42, |idea: &mut Idea| idea.title.clear());
        assert!(!found);
        assert_eq!(next, ideas);
    }

    #[test]
    fn modify_edits_in_place() {
        let (next, found) = modify(&sample(), 1, |idea: &mut Idea| idea.title.push('!'));
        assert!(found);
        assert_eq!(next[0].title, "one!");
    }

    #[test]
    fn update_propagates_patch_rejection() {
        let err = update(
            &sample(),
            1,
            |_: &mut Idea| -> Result<(), ValidationError> {
                Err(ValidationError::Blank { field: "title" })
            },
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::Blank { field: "title" });
    }

    #[test]
    fn delete_is_idempotent() {
        let ideas = sample();
        let once = delete(&ideas, 1);
        let twice = delete(&once, 1);
        assert_eq!(once, twice);
        assert_eq!(delete(&ideas, 77), ideas);
    }
}
