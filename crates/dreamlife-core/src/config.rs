use crate::error::{DreamlifeError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Profile / Preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_email")]
    pub email: String,
}

fn default_name() -> String {
    "User Name".to_string()
}

fn default_email() -> String {
    "user@example.com".to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: default_email(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl std::str::FromStr for Theme {
    type Err = DreamlifeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(DreamlifeError::InvalidValue {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub email_updates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
            email_updates: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

/// Keys accepted by [`Config::set`].
pub const SETTING_KEYS: &[&str] = &[
    "profile.name",
    "profile.email",
    "preferences.theme",
    "preferences.notifications",
    "preferences.email_updates",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub preferences: Preferences,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            profile: Profile::default(),
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(paths::config_path(root))?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Defaults when the file does not exist yet; a file that exists but
    /// does not parse is still an error.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        if !paths::config_path(root).exists() {
            return Ok(Self::default());
        }
        Self::load(root)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        crate::io::atomic_write(&path, self.to_yaml()?.as_bytes())
    }

    /// Change one setting by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "profile.name" => self.profile.name = value.trim().to_string(),
            "profile.email" => self.profile.email = value.trim().to_string(),
            "preferences.theme" => self.preferences.theme = value.parse()?,
            "preferences.notifications" => self.preferences.notifications = parse_bool(value)?,
            "preferences.email_updates" => self.preferences.email_updates = parse_bool(value)?,
            _ => return Err(DreamlifeError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != default_version() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unsupported config version {}", self.version),
            });
        }

        if self.profile.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "profile.name is empty".to_string(),
            });
        }

        if !self.profile.email.contains('@') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("profile.email '{}' is not a valid email", self.profile.email),
            });
        }

        if self.preferences.email_updates && !self.preferences.notifications {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "email_updates is on but notifications are off".to_string(),
            });
        }

        warnings
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DreamlifeError::InvalidValue {
            kind: "boolean",
            value: value.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn missing_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_or_default(dir.path()).unwrap(), Config::default());
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.set("profile.name", "Robin").unwrap();
        cfg.set("preferences.theme", "Dark").unwrap();
        cfg.set("preferences.notifications", "off").unwrap();
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.preferences.theme, Theme::Dark);
        assert!(!loaded.preferences.notifications);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("profile:\n  name: Jo\n").unwrap();
        assert_eq!(cfg.profile.name, "Jo");
        assert_eq!(cfg.profile.email, "user@example.com");
        assert!(cfg.preferences.notifications);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_value() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("profile.age", "30"),
            Err(DreamlifeError::UnknownSetting(_))
        ));
        assert!(matches!(
            cfg.set("preferences.theme", "neon"),
            Err(DreamlifeError::InvalidValue { kind: "theme", .. })
        ));
        assert!(cfg.set("preferences.email_updates", "maybe").is_err());
    }

    #[test]
    fn validate_flags_bad_email() {
        let mut cfg = Config::default();
        cfg.profile.email = "nobody".into();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert!(warnings[0].message.contains("nobody"));
    }
}
