pub mod auth;
pub mod clock;
pub mod collection;
pub mod config;
pub mod dream;
pub mod editor;
pub mod error;
pub mod goal;
pub mod habit;
pub mod io;
pub mod journal;
pub mod letter;
pub mod life_area;
pub mod metrics;
pub mod money;
pub mod paths;
pub mod planner;
pub mod progress;
pub mod storage;
pub mod template;
pub mod travel;
pub mod types;
pub mod vision;

pub use collection::{Collection, Record, RecordId, Store};
pub use error::{DreamlifeError, Result, ValidationError};
