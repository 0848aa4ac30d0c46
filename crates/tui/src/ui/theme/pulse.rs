//! Pulse palettes: zinc surfaces with an indigo accent.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Zinc neutrals
const ZINC_50: Color = Color::Rgb(0xFA, 0xFA, 0xFA);
const ZINC_100: Color = Color::Rgb(0xF4, 0xF4, 0xF5);
const ZINC_200: Color = Color::Rgb(0xE4, 0xE4, 0xE7);
const ZINC_400: Color = Color::Rgb(0xA1, 0xA1, 0xAA);
const ZINC_500: Color = Color::Rgb(0x71, 0x71, 0x7A);
const ZINC_600: Color = Color::Rgb(0x52, 0x52, 0x5B);
const ZINC_800: Color = Color::Rgb(0x27, 0x27, 0x2A);
const ZINC_900: Color = Color::Rgb(0x18, 0x18, 0x1B);
const ZINC_950: Color = Color::Rgb(0x09, 0x09, 0x0B);
const NEAR_BLACK: Color = Color::Rgb(0x11, 0x11, 0x14);

// Accents
const INDIGO_300: Color = Color::Rgb(0xA5, 0xB4, 0xFC);
const INDIGO_400: Color = Color::Rgb(0x81, 0x8C, 0xF8);
const INDIGO_500: Color = Color::Rgb(0x63, 0x66, 0xF1);
const INDIGO_600: Color = Color::Rgb(0x4F, 0x46, 0xE5);
const INDIGO_800: Color = Color::Rgb(0x37, 0x30, 0xA3);
const INDIGO_100: Color = Color::Rgb(0xE0, 0xE7, 0xFF);
const INDIGO_950: Color = Color::Rgb(0x1E, 0x1B, 0x4B);
const VIOLET_400: Color = Color::Rgb(0xA7, 0x8B, 0xFA);
const VIOLET_600: Color = Color::Rgb(0x7C, 0x3A, 0xED);

/// Default dark palette.
#[derive(Debug, Clone)]
pub struct PulseTheme {
    roles: ThemeRoles,
}

impl PulseTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: ZINC_950,
                surface: NEAR_BLACK,
                surface_muted: ZINC_900,
                border: ZINC_800,

                text: ZINC_100,
                text_secondary: ZINC_400,
                text_muted: ZINC_500,

                accent_primary: INDIGO_400,
                accent_secondary: VIOLET_400,

                success: Color::Rgb(0x34, 0xD3, 0x99),
                warning: Color::Rgb(0xFB, 0xBF, 0x24),
                error: Color::Rgb(0xF8, 0x71, 0x71),

                selection_bg: INDIGO_950,
                selection_fg: INDIGO_300,
                focus: INDIGO_500,
            },
        }
    }
}

impl Theme for PulseTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Light variant for bright terminal profiles.
#[derive(Debug, Clone)]
pub struct PulseLightTheme {
    roles: ThemeRoles,
}

impl PulseLightTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: ZINC_50,
                surface: Color::Rgb(0xFF, 0xFF, 0xFF),
                surface_muted: ZINC_100,
                border: ZINC_200,

                text: ZINC_900,
                text_secondary: ZINC_600,
                text_muted: ZINC_500,

                accent_primary: INDIGO_600,
                accent_secondary: VIOLET_600,

                success: Color::Rgb(0x05, 0x96, 0x69),
                warning: Color::Rgb(0xD9, 0x77, 0x06),
                error: Color::Rgb(0xDC, 0x26, 0x26),

                selection_bg: INDIGO_100,
                selection_fg: INDIGO_800,
                focus: INDIGO_500,
            },
        }
    }
}

impl Theme for PulseLightTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
