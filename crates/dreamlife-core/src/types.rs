use crate::error::DreamlifeError;
use serde::{Deserialize, Serialize};
use std::fmt;

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

// ---------------------------------------------------------------------------
// GoalStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Dreaming,
    InProgress,
    Achieved,
}

impl GoalStatus {
    pub fn all() -> &'static [GoalStatus] {
        &[
            GoalStatus::Dreaming,
            GoalStatus::InProgress,
            GoalStatus::Achieved,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::Dreaming => "dreaming",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Achieved => "achieved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalStatus::Dreaming => "Dreaming",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Achieved => "Achieved",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = DreamlifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "dreaming" => Ok(GoalStatus::Dreaming),
            "in_progress" => Ok(GoalStatus::InProgress),
            "achieved" => Ok(GoalStatus::Achieved),
            _ => Err(DreamlifeError::InvalidValue {
                kind: "goal status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DestinationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationStatus {
    Wishlist,
    Visited,
}

impl DestinationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DestinationStatus::Wishlist => "wishlist",
            DestinationStatus::Visited => "visited",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DestinationStatus::Wishlist => DestinationStatus::Visited,
            DestinationStatus::Visited => DestinationStatus::Wishlist,
        }
    }
}

impl fmt::Display for DestinationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DestinationStatus {
    type Err = DreamlifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "wishlist" => Ok(DestinationStatus::Wishlist),
            "visited" => Ok(DestinationStatus::Visited),
            _ => Err(DreamlifeError::InvalidValue {
                kind: "destination status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = DreamlifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(DreamlifeError::InvalidValue {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// BoardMood
// ---------------------------------------------------------------------------

/// Theme a vision board is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardMood {
    Career,
    Love,
    Travel,
    Health,
    Finance,
}

impl BoardMood {
    pub fn all() -> &'static [BoardMood] {
        &[
            BoardMood::Career,
            BoardMood::Love,
            BoardMood::Travel,
            BoardMood::Health,
            BoardMood::Finance,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardMood::Career => "career",
            BoardMood::Love => "love",
            BoardMood::Travel => "travel",
            BoardMood::Health => "health",
            BoardMood::Finance => "finance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoardMood::Career => "Career",
            BoardMood::Love => "Love & Relationships",
            BoardMood::Travel => "Travel",
            BoardMood::Health => "Health & Wellness",
            BoardMood::Finance => "Finance",
        }
    }
}

impl fmt::Display for BoardMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BoardMood {
    type Err = DreamlifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = normalize(s);
        BoardMood::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == n)
            .ok_or_else(|| DreamlifeError::InvalidValue {
                kind: "board mood",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// LetterState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterState {
    Locked,
    Unlocked,
}

impl fmt::Display for LetterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LetterState::Locked => "locked",
            LetterState::Unlocked => "unlocked",
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_status_parses_labels_and_keys() {
        assert_eq!("In Progress".parse::<GoalStatus>().unwrap(), GoalStatus::InProgress);
        assert_eq!("in-progress".parse::<GoalStatus>().unwrap(), GoalStatus::InProgress);
        assert_eq!("ACHIEVED".parse::<GoalStatus>().unwrap(), GoalStatus::Achieved);
        assert!("done".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn goal_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&GoalStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn destination_toggle_is_an_involution() {
        for s in [DestinationStatus::Wishlist, DestinationStatus::Visited] {
            assert_eq!(s.toggled().toggled(), s);
        }
    }

    #[test]
    fn board_mood_round_trip_through_str() {
        for &m in BoardMood::all() {
            assert_eq!(m.as_str().parse::<BoardMood>().unwrap(), m);
        }
        assert!("all".parse::<BoardMood>().is_err());
    }

    #[test]
    fn priority_parse_rejects_unknown() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
