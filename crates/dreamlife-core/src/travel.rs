use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft};
use crate::error::{require_text, ValidationError};
use crate::metrics;
use crate::paths;
use crate::types::DestinationStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub status: DestinationStatus,
}

impl Record for Destination {
    const SLOT: &'static str = paths::SLOT_TRAVEL;
    const KIND: &'static str = "destination";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

#[derive(Debug, Clone)]
pub struct DestinationDraft {
    pub name: String,
    pub notes: String,
    pub status: DestinationStatus,
}

impl DestinationDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: String::new(),
            status: DestinationStatus::Wishlist,
        }
    }
}

impl Draft for DestinationDraft {
    type Record = Destination;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }

    fn into_record(self, id: RecordId, _clock: &dyn Clock) -> Destination {
        Destination {
            id,
            name: self.name.trim().to_string(),
            notes: self.notes,
            status: self.status,
        }
    }
}

/// Wishlist <-> visited.
pub fn toggle_status(
    destinations: &Collection<Destination>,
    id: RecordId,
) -> (Collection<Destination>, bool) {
    editor::modify(destinations, id, |d: &mut Destination| {
        d.status = d.status.toggled()
    })
}

/// `None` keeps everything.
pub fn filter(
    destinations: &[Destination],
    status: Option<DestinationStatus>,
) -> Vec<&Destination> {
    destinations
        .iter()
        .filter(|d| status.map_or(true, |s| d.status == s))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TravelStats {
    pub wishlist: usize,
    pub visited: usize,
    pub total: usize,
}

pub fn stats(destinations: &[Destination]) -> TravelStats {
    TravelStats {
        wishlist: metrics::count_where(destinations, |d| {
            d.status == DestinationStatus::Wishlist
        }),
        visited: metrics::count_where(destinations, |d| d.status == DestinationStatus::Visited),
        total: destinations.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn sample() -> Collection<Destination> {
        let c = clock();
        let (d, _) = editor::create(&Collection::new(), DestinationDraft::new("Kyoto"), &c).unwrap();
        let (d, _) = editor::create(&d, DestinationDraft::new("Reykjavik"), &c).unwrap();
        d
    }

    #[test]
    fn starts_empty_and_requires_name() {
        assert!(Destination::seed(clock().today()).is_empty());
        assert!(editor::create(&Collection::new(), DestinationDraft::new(""), &clock()).is_err());
    }

    #[test]
    fn toggle_and_stats() {
        let d = sample();
        let kyoto = d[0].id;
        let (d, found) = toggle_status(&d, kyoto);
        assert!(found);
        assert_eq!(
            stats(&d),
            TravelStats {
                wishlist: 1,
                visited: 1,
                total: 2
            }
        );
        let visited = filter(&d, Some(DestinationStatus::Visited));
        assert_eq!(visited.len(), 1);
        assert_eq!(visited[0].name, "Kyoto");
        assert_eq!(filter(&d, None).len(), 2);

        let (back, _) = toggle_status(&d, kyoto);
        assert_eq!(back, sample());
    }
}
