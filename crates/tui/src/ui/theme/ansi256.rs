//! ANSI 256-color fallback theme tailored for terminals without truecolor support.
//!
//! Approximates the Pulse palette with indexed colors.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

/// ANSI 256-color approximation of the Pulse palette.
#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(232),
                surface: Color::Indexed(233),
                surface_muted: Color::Indexed(235),
                border: Color::Indexed(237),

                text: Color::Indexed(255),
                text_secondary: Color::Indexed(248),
                text_muted: Color::Indexed(244),

                accent_primary: Color::Indexed(105),
                accent_secondary: Color::Indexed(141),

                success: Color::Indexed(78),
                warning: Color::Indexed(214),
                error: Color::Indexed(203),

                selection_bg: Color::Indexed(17),
                selection_fg: Color::Indexed(153),
                focus: Color::Indexed(62),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }

    fn supports_truecolor(&self) -> bool {
        false
    }
}
