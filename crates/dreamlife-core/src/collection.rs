//! Named, persisted collections of records.
//!
//! Every tracker keeps its records as a JSON array in one slot. Loading never
//! fails: an empty, unreadable or malformed slot yields the tracker's seed
//! records instead. Saving always overwrites the whole slot.

use crate::clock::Clock;
use crate::error::Result;
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Deref;

pub type RecordId = u64;

/// A record kind stored in its own slot.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Slot the collection of this kind lives in.
    const SLOT: &'static str;

    /// Human-readable kind, used in messages.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Records a fresh slot starts with.
    fn seed(_today: NaiveDate) -> Vec<Self> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Ordered records of one kind. Serializes as a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> Collection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<R> {
        self.records
    }

    pub(crate) fn push(&mut self, record: R) {
        self.records.push(record);
    }
}

impl<R> Deref for Collection<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        &self.records
    }
}

impl<R> From<Vec<R>> for Collection<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R> FromIterator<R> for Collection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R: Record> Collection<R> {
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: RecordId) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> Option<RecordId> {
        self.records.iter().map(Record::id).max()
    }

    /// Fresh id: the creation timestamp in milliseconds, bumped past the
    /// largest live id so it can never collide with an existing record.
    pub fn next_id(&self, now_millis: i64) -> RecordId {
        let stamp = u64::try_from(now_millis).unwrap_or(0);
        let floor = self.max_id().map_or(1, |max| max.saturating_add(1));
        stamp.max(floor)
    }

    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.records.iter().all(|r| seen.insert(r.id()))
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Loads and saves collections and scalar values through a key-value backend.
#[derive(Debug, Clone)]
pub struct Store<S> {
    backend: S,
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Read `slot`, falling back to `defaults` when it is empty or does not
    /// hold a well-formed collection.
    pub fn load<R: Record>(&self, slot: &str, defaults: impl FnOnce() -> Vec<R>) -> Collection<R> {
        let raw = match self.backend.get(slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Collection::from(defaults()),
            Err(e) => {
                tracing::debug!(slot, error = %e, "slot unreadable, using defaults");
                return Collection::from(defaults());
            }
        };
        match serde_json::from_str::<Collection<R>>(&raw) {
            Ok(collection) if collection.has_unique_ids() => collection,
            Ok(_) => {
                tracing::debug!(slot, "slot has duplicate ids, using defaults");
                Collection::from(defaults())
            }
            Err(e) => {
                tracing::debug!(slot, error = %e, "slot malformed, using defaults");
                Collection::from(defaults())
            }
        }
    }

    /// Serialize the whole collection and overwrite `slot`.
    pub fn save<R: Record>(&mut self, slot: &str, collection: &Collection<R>) -> Result<()> {
        let data = serde_json::to_string_pretty(collection)?;
        self.backend.set(slot, &data)?;
        tracing::debug!(slot, records = collection.len(), "saved collection");
        Ok(())
    }

    /// Load the collection for `R` from its own slot, seeding on first use.
    pub fn load_records<R: Record>(&self, clock: &dyn Clock) -> Collection<R> {
        let today = clock.today();
        self.load(R::SLOT, || R::seed(today))
    }

    pub fn save_records<R: Record>(&mut self, collection: &Collection<R>) -> Result<()> {
        self.save(R::SLOT, collection)
    }

    /// Read a scalar slot. Empty or malformed slots read as `None`.
    pub fn load_value<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let raw = match self.backend.get(slot) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::debug!(slot, error = %e, "slot unreadable");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| tracing::debug!(slot, error = %e, "slot malformed"))
            .ok()
    }

    pub fn save_value<T: Serialize + ?Sized>(&mut self, slot: &str, value: &T) -> Result<()> {
        let data = serde_json::to_string_pretty(value)?;
        self.backend.set(slot, &data)
    }

    /// Clear one slot. Returns `false` if it was already empty.
    pub fn clear(&mut self, slot: &str) -> Result<bool> {
        self.backend.remove(slot)
    }

    /// Clear every slot. Returns how many were removed.
    pub fn clear_all(&mut self) -> Result<usize> {
        let keys = self.backend.keys()?;
        let mut removed = 0;
        for key in keys {
            if self.backend.remove(&key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
