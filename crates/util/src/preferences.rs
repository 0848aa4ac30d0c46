//! User preference persistence for the ContextFlow shell.
//!
//! A small JSON file records the settings a user chose to keep between runs:
//! the preferred theme and motion settings. The file lives in the standard
//! configuration directory (`~/.config/contextflow/preferences.json` on most
//! platforms) unless `CONTEXTFLOW_PREFERENCES_PATH` points elsewhere.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{app_config_dir, expand_tilde};

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "CONTEXTFLOW_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values. Every field is optional so that an absent
/// value defers to environment variables and built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical identifier of the preferred theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_theme: Option<String>,
    /// Disable panel transition animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
    /// Panel transition duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u64>,
}

/// Preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: PreferencesPayload,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Load the store from the default location (or the env override).
    pub fn new() -> Result<Self, PreferencesError> {
        Self::at_path(default_preferences_path())
    }

    /// Load the store rooted at `path`. A missing file yields defaults.
    pub fn at_path(path: PathBuf) -> Result<Self, PreferencesError> {
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload,
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: PreferencesPayload::default(),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn payload(&self) -> &PreferencesPayload {
        &self.payload
    }

    /// Returns the canonical identifier of the preferred theme, if one was saved.
    pub fn preferred_theme(&self) -> Option<&str> {
        self.payload.preferred_theme.as_deref()
    }

    pub fn reduced_motion(&self) -> Option<bool> {
        self.payload.reduced_motion
    }

    pub fn transition_ms(&self) -> Option<u64> {
        self.payload.transition_ms
    }

    /// Replace the stored values and write them to disk.
    pub fn save(&mut self, payload: PreferencesPayload) -> Result<(), PreferencesError> {
        self.payload = payload;
        if self.persist_to_disk {
            self.write_payload()?;
            debug!(path = %self.path.display(), "Saved preferences");
        }
        Ok(())
    }

    fn write_payload(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    app_config_dir().join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}
