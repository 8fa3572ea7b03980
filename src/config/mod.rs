//! Theme preference persistence.
//!
//! A single JSON file under the platform config directory
//! (`~/.config/callpad/preferences.json`). A missing file loads as the
//! default dark theme; the core formatting logic never reads this.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the preferences file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Serializable preferences record — the whole file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Theme,
}

/// Loads and saves the preferences file.
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    /// Creates a store rooted at the platform config directory.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self {
            path: config_dir.join("callpad").join("preferences.json"),
        })
    }

    /// Creates a store using the given file path.
    #[cfg(test)]
    pub(crate) fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the saved theme, defaulting to [`Theme::Dark`] when no
    /// preferences file exists yet.
    pub fn load(&self) -> Result<Theme, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let prefs: Preferences = serde_json::from_str(&content)?;
                Ok(prefs.theme)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Theme::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Saves the theme, creating the config directory if needed.
    pub fn save(&self, theme: Theme) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(&Preferences { theme })?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
