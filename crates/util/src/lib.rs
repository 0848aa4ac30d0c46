//! Utility helpers shared by the ContextFlow binary and TUI: path expansion,
//! environment flag parsing, and the persisted user preferences store.

pub mod path_processing;
pub mod preferences;

pub use path_processing::{app_config_dir, expand_tilde};
pub use preferences::{PreferencesError, PreferencesPayload, UserPreferences};

/// Interprets common truthy spellings used in environment variables.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enable" | "enabled"
    )
}

/// Reads an environment variable as a boolean flag. Unset or unrecognized
/// values are `false`.
pub fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|value| is_truthy(&value)).unwrap_or(false)
}
