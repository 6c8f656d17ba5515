use crate::error::{DreamlifeError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DREAMLIFE_DIR: &str = ".dreamlife";
pub const SLOTS_DIR: &str = ".dreamlife/slots";
pub const CONFIG_FILE: &str = ".dreamlife/config.yaml";

pub const SLOT_EXTENSION: &str = "json";

// ---------------------------------------------------------------------------
// Slot names
// ---------------------------------------------------------------------------

pub const SLOT_DREAM_GOALS: &str = "dream-goals";
pub const SLOT_HABITS: &str = "habits";
pub const SLOT_LETTERS: &str = "letters";
pub const SLOT_TRAVEL: &str = "travel-destinations";
pub const SLOT_MONEY_GOALS: &str = "money-goals";
pub const SLOT_PLANNER_TASKS: &str = "planner-tasks";
pub const SLOT_REFLECTION: &str = "reflection-entries";
pub const SLOT_VISION_ITEMS: &str = "vision-board-items";
pub const SLOT_VISION_BOARDS: &str = "vision-boards";
pub const SLOT_LIFE_AREAS: &str = "life-areas";
pub const SLOT_DREAM_STATEMENT: &str = "dream-statement";
pub const SLOT_USER: &str = "user";
pub const SLOT_SESSION: &str = "session";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn dreamlife_dir(root: &Path) -> PathBuf {
    root.join(DREAMLIFE_DIR)
}

pub fn slots_dir(root: &Path) -> PathBuf {
    root.join(SLOTS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn slot_file(slots_dir: &Path, key: &str) -> PathBuf {
    slots_dir.join(format!("{key}.{SLOT_EXTENSION}"))
}

/// Nearest ancestor of `start` (inclusive) that holds a `.dreamlife/` dir.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dreamlife_dir(dir).is_dir())
        .map(Path::to_path_buf)
}

/// The user's home directory, where data lives when no project root is found.
pub fn home_root() -> Result<PathBuf> {
    home::home_dir().ok_or(DreamlifeError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Slot key validation
// ---------------------------------------------------------------------------

static SLOT_RE: OnceLock<Regex> = OnceLock::new();

fn slot_re() -> &'static Regex {
    SLOT_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Slot keys double as file stems, so they are restricted to a safe alphabet.
pub fn validate_slot_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 64 || !slot_re().is_match(key) {
        return Err(DreamlifeError::InvalidSlotKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_root_walks_up() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_root(&nested), None);

        std::fs::create_dir_all(dreamlife_dir(dir.path())).unwrap();
        assert_eq!(find_root(&nested).as_deref(), Some(dir.path()));
    }

    #[test]
    fn builtin_slot_names_are_valid() {
        for key in [
            SLOT_DREAM_GOALS,
            SLOT_HABITS,
            SLOT_LETTERS,
            SLOT_TRAVEL,
            SLOT_MONEY_GOALS,
            SLOT_PLANNER_TASKS,
            SLOT_REFLECTION,
            SLOT_VISION_ITEMS,
            SLOT_VISION_BOARDS,
            SLOT_LIFE_AREAS,
            SLOT_DREAM_STATEMENT,
            SLOT_USER,
            SLOT_SESSION,
        ] {
            validate_slot_key(key).unwrap_or_else(|_| panic!("expected valid: {key}"));
        }
    }

    #[test]
    fn invalid_slot_keys() {
        for key in [
            "",
            "-leading",
            "trailing-",
            "Upper",
            "has space",
            "../escape",
            "dots.json",
            &"a".repeat(65),
        ] {
            assert!(validate_slot_key(key).is_err(), "expected invalid: {key}");
        }
    }

    #[test]
    fn slot_file_uses_json_extension() {
        let p = slot_file(Path::new("/tmp/slots"), "habits");
        assert_eq!(p, Path::new("/tmp/slots/habits.json"));
    }
}
