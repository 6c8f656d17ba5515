use thiserror::Error;

#[derive(Debug, Error)]
pub enum DreamlifeError {
    #[error("invalid slot key '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlotKey(String),

    #[error("{kind} {id} not found")]
    RecordNotFound { kind: &'static str, id: u64 },

    #[error("letter {id} is locked for {days} more day(s)")]
    LetterLocked { id: u64, days: i64 },

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("home directory not found: set HOME or pass --root")]
    HomeNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] crate::auth::AuthError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DreamlifeError>;

/// Reason a form submission was refused. The record editor returns these
/// instead of touching the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Blank { field: &'static str },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a positive amount")]
    NotPositive { field: &'static str },
}

/// Refuse blank (empty or whitespace-only) text.
pub fn require_text(field: &'static str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Refuse zero, negative, NaN and infinite amounts.
pub fn require_positive(field: &'static str, value: f64) -> std::result::Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}
