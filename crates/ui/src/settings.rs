//! Application settings
//!
//! Read from `$HOME/.config/formwright/settings.toml`. Every key is
//! optional; a missing file means defaults.

use formwright_core::{FormError, FormResult};
use formwright_schema::repository::DEFAULT_SHARE_ORIGIN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the stored forms, submissions and configurations
    pub storage_dir: PathBuf,

    /// Origin prefixed to share links
    pub share_origin: String,

    /// Undo steps kept by the designer
    pub history_limit: usize,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: config_dir(),
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> PathBuf {
        config_dir().join(SETTINGS_FILE)
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> FormResult<Self> {
        toml::from_str(text).map_err(|e| FormError::InvalidSettings(e.to_string()))
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> FormResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(FormError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from the default location, falling back to defaults on error
    ///
    /// Called before logging is set up, so problems are returned alongside
    /// the settings for the caller to report.
    pub fn load_or_default() -> (Self, Option<FormError>) {
        match Self::load_from(&Self::default_path()) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Write settings as TOML
    pub fn save_to(&self, path: &Path) -> FormResult<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| FormError::InvalidSettings(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text).map_err(|e| FormError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Undo limit, never zero
    pub fn effective_history_limit(&self) -> usize {
        self.history_limit.max(1)
    }
}

/// `$HOME/.config/formwright`, or a relative directory without a home
fn config_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("formwright")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.share_origin, "http://localhost:8080");
        assert_eq!(settings.history_limit, 50);
        assert_eq!(settings.log_level, "info");
        assert!(settings.storage_dir.ends_with(".config/formwright"));
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml(
            r#"
            share_origin = "https://forms.example.com"
            history_limit = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.share_origin, "https://forms.example.com");
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_malformed_file() {
        let err = Settings::from_toml("history_limit = \"lots\"").unwrap_err();
        assert!(matches!(err, FormError::InvalidSettings(_)));
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp_dir.path().join("none.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join(SETTINGS_FILE);
        let settings = Settings {
            storage_dir: temp_dir.path().join("data"),
            history_limit: 0,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.effective_history_limit(), 1);
    }
}
