//! Vision board items (quotes and images) and themed vision boards.

use crate::clock::Clock;
use crate::collection::{Collection, Record, RecordId};
use crate::editor::{self, Draft};
use crate::error::{require_text, ValidationError};
use crate::paths;
use crate::types::BoardMood;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const ITEM_COLORS: [&str; 4] = ["lavender", "blue", "pink", "sage"];

// ---------------------------------------------------------------------------
// Vision board items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisionContent {
    Quote { content: String, author: String },
    Image { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionItem {
    pub id: RecordId,
    #[serde(flatten)]
    pub content: VisionContent,
}

impl Record for VisionItem {
    const SLOT: &'static str = paths::SLOT_VISION_ITEMS;
    const KIND: &'static str = "vision item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        let quote = |id, text: &str| VisionItem {
            id,
            content: VisionContent::Quote {
                content: text.to_string(),
                author: UNKNOWN_AUTHOR.to_string(),
            },
        };
        vec![
            quote(1, "Dream big, work hard, stay focused"),
            quote(2, "Your future is created by what you do today"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub content: String,
    /// Blank means [`UNKNOWN_AUTHOR`].
    pub author: String,
}

impl Draft for QuoteDraft {
    type Record = VisionItem;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("quote", &self.content)
    }

    fn into_record(self, id: RecordId, _clock: &dyn Clock) -> VisionItem {
        let author = match self.author.trim() {
            "" => UNKNOWN_AUTHOR.to_string(),
            a => a.to_string(),
        };
        VisionItem {
            id,
            content: VisionContent::Quote {
                content: self.content.trim().to_string(),
                author,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageDraft {
    pub url: String,
}

impl Draft for ImageDraft {
    type Record = VisionItem;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("image url", &self.url)
    }

    fn into_record(self, id: RecordId, _clock: &dyn Clock) -> VisionItem {
        VisionItem {
            id,
            content: VisionContent::Image {
                url: self.url.trim().to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Vision boards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    /// Unique within its board only.
    pub id: u32,
    pub content: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionBoard {
    pub id: RecordId,
    pub title: String,
    pub mood: BoardMood,
    #[serde(default)]
    pub items: Vec<BoardItem>,
}

impl VisionBoard {
    fn next_item_id(&self) -> u32 {
        self.items.iter().map(|i| i.id).max().map_or(1, |m| m.saturating_add(1))
    }
}

impl Record for VisionBoard {
    const SLOT: &'static str = paths::SLOT_VISION_BOARDS;
    const KIND: &'static str = "vision board";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        let item = |id, content: &str, color: &str| BoardItem {
            id,
            content: content.to_string(),
            color: color.to_string(),
        };
        vec![
            VisionBoard {
                id: 1,
                title: "Career Dreams".into(),
                mood: BoardMood::Career,
                items: vec![item(1, "CEO by 30", "lavender"), item(2, "Impact 1M+ lives", "blue")],
            },
            VisionBoard {
                id: 2,
                title: "Travel Goals".into(),
                mood: BoardMood::Travel,
                items: vec![item(1, "Japan 🗾", "pink"), item(2, "Iceland", "blue")],
            },
        ]
    }
}

#[derive(Debug, Clone)]
pub struct BoardDraft {
    pub title: String,
    pub mood: BoardMood,
}

impl BoardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mood: BoardMood::Career,
        }
    }
}

impl Draft for BoardDraft {
    type Record = VisionBoard;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }

    fn into_record(self, id: RecordId, _clock: &dyn Clock) -> VisionBoard {
        VisionBoard {
            id,
            title: self.title.trim().to_string(),
            mood: self.mood,
            items: Vec::new(),
        }
    }
}

/// Pin a text card to a board. Colors cycle when `color` is `None`.
pub fn add_board_item(
    boards: &Collection<VisionBoard>,
    board: RecordId,
    content: &str,
    color: Option<&str>,
) -> Result<(Collection<VisionBoard>, bool), ValidationError> {
    require_text("item", content)?;
    Ok(editor::modify(boards, board, |b: &mut VisionBoard| {
        let color = color
            .map(str::to_string)
            .unwrap_or_else(|| ITEM_COLORS[b.items.len() % ITEM_COLORS.len()].to_string());
        let id = b.next_item_id();
        b.items.push(BoardItem {
            id,
            content: content.trim().to_string(),
            color,
        });
    }))
}

/// `false` when either the board or the item is unknown.
pub fn remove_board_item(
    boards: &Collection<VisionBoard>,
    board: RecordId,
    item: u32,
) -> (Collection<VisionBoard>, bool) {
    let present = boards
        .get(board)
        .is_some_and(|b| b.items.iter().any(|i| i.id == item));
    if !present {
        return (boards.clone(), false);
    }
    editor::modify(boards, board, |b: &mut VisionBoard| b.items.retain(|i| i.id != item))
}

/// `None` keeps every board.
pub fn by_mood(boards: &[VisionBoard], mood: Option<BoardMood>) -> Vec<&VisionBoard> {
    boards
        .iter()
        .filter(|b| mood.map_or(true, |m| b.mood == m))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
