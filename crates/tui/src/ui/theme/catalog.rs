use super::{Ansi256Theme, PulseLightTheme, PulseTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

/// Ordered list of selectable themes. The first entry is the truecolor
/// default, the last the ANSI fallback.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "pulse",
        label: "Pulse",
        aliases: &["pulse", "dark", "pulse-dark"],
        is_ansi_fallback: false,
        factory: || Box::new(PulseTheme::new()),
    },
    ThemeDefinition {
        id: "pulse_light",
        label: "Pulse Light",
        aliases: &["pulse_light", "pulse-light", "light"],
        is_ansi_fallback: false,
        factory: || Box::new(PulseLightTheme::new()),
    },
    ThemeDefinition {
        id: "ansi256",
        label: "ANSI 256",
        aliases: &["ansi256", "256"],
        is_ansi_fallback: true,
        factory: || Box::new(Ansi256Theme::new()),
    },
];

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let normalized = name.trim().to_ascii_lowercase();
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id == normalized || definition.aliases.iter().any(|alias| *alias == normalized)
    })
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[THEME_DEFINITIONS.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_expected_entries() {
        assert_eq!(default_truecolor().id, "pulse");
        assert!(!default_truecolor().is_ansi_fallback);
        assert_eq!(default_ansi().id, "ansi256");
        assert!(default_ansi().is_ansi_fallback);
    }

    #[test]
    fn resolve_matches_ids_and_aliases() {
        assert_eq!(resolve("PULSE").map(|d| d.id), Some("pulse"));
        assert_eq!(resolve(" light ").map(|d| d.id), Some("pulse_light"));
        assert_eq!(resolve("256").map(|d| d.id), Some("ansi256"));
        assert!(resolve("dracula").is_none());
    }

    #[test]
    fn ansi_fallback_reports_no_truecolor() {
        assert!(!default_ansi().build().supports_truecolor());
        assert!(default_truecolor().build().supports_truecolor());
    }
}
