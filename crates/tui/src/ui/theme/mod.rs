//! Theme styling module for the TUI UI layer.
//!
//! Defines the Pulse palettes, an ANSI 256-color fallback, semantic theme
//! roles, and helper builders for Ratatui widgets and styles. Prefer these
//! helpers over hard-coding colors to keep the UI consistent.

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod catalog;
pub mod pulse;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use pulse::{PulseLightTheme, PulseTheme};
pub use roles::Theme;

/// Environment variable naming a theme id or alias.
pub const THEME_ENV: &str = "TUI_THEME";

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

impl std::fmt::Debug for LoadedTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedTheme").field("id", &self.definition.id).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme. Precedence: explicit request (CLI flag), `TUI_THEME`,
/// the persisted preference, then the default for the terminal's color
/// capability. ANSI-only terminals always get the fallback palette.
pub fn load(requested: Option<&str>, preferred_theme: Option<&str>) -> LoadedTheme {
    let capability = detect_color_capability();
    if matches!(capability, ColorCapability::Ansi256) {
        debug!("ANSI-only terminal detected; ignoring theme overrides and forcing fallback palette.");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    if let Some(name) = requested
        && let Some(definition) = catalog::resolve(name)
    {
        return LoadedTheme::from_definition(definition);
    }

    if let Ok(theme_name) = env::var(THEME_ENV)
        && let Some(definition) = catalog::resolve(theme_name.trim())
    {
        return LoadedTheme::from_definition(definition);
    }

    if let Some(name) = preferred_theme
        && let Some(definition) = catalog::resolve(name)
    {
        return LoadedTheme::from_definition(definition);
    }

    LoadedTheme::from_definition(catalog::default_truecolor())
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var("TUI_COLOR_MODE").ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    if env::var("TUI_FORCE_TRUECOLOR")
        .map(|value| contextflow_util::is_truthy(&value))
        .unwrap_or(false)
    {
        return ColorCapability::Truecolor;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_mode_variants() {
        assert_eq!(parse_color_mode("24bit"), Some(ColorCapability::Truecolor));
        assert_eq!(parse_color_mode("256"), Some(ColorCapability::Ansi256));
        assert_eq!(parse_color_mode("mono"), None);
    }

    #[test]
    fn explicit_request_beats_env_and_preference() {
        temp_env::with_vars(
            [("TUI_COLOR_MODE", Some("truecolor")), (THEME_ENV, Some("pulse"))],
            || {
                let loaded = load(Some("light"), Some("pulse"));
                assert_eq!(loaded.definition.id, "pulse_light");
            },
        );
    }

    #[test]
    fn preference_applies_when_nothing_else_is_set() {
        temp_env::with_vars([("TUI_COLOR_MODE", Some("truecolor")), (THEME_ENV, None)], || {
            assert_eq!(load(None, Some("pulse_light")).definition.id, "pulse_light");
            assert_eq!(load(None, None).definition.id, "pulse");
        });
    }

    #[test]
    fn ansi_terminals_always_get_fallback() {
        temp_env::with_vars([("TUI_COLOR_MODE", Some("ansi256"))], || {
            assert_eq!(load(Some("pulse_light"), None).definition.id, "ansi256");
        });
    }
}
