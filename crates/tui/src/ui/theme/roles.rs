use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// The palette a shell theme is built from.
///
/// `background` is the canvas behind the top bar and the content region;
/// the sidebar and cards sit on `surface`.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Brand color: the logo mark, active controls and the plan gauge.
    pub accent_primary: Color,
    pub accent_secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Active navigation row.
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Focus ring: borders of the focused card and the sidebar marker.
    pub focus: Color,
}

/// Style builders shared by the shell's components.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    /// Whether arbitrary RGB colors (connector accents, fades) can be shown.
    fn supports_truecolor(&self) -> bool {
        true
    }

    fn canvas_style(&self) -> Style {
        Style::default().bg(self.roles().background)
    }
    fn sidebar_surface_style(&self) -> Style {
        Style::default().bg(self.roles().surface)
    }

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }
    fn focus_marker_style(&self) -> Style {
        Style::default().fg(self.roles().focus)
    }

    /// Row style of the active sidebar item.
    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    fn status_success(&self) -> Style {
        Style::default().fg(self.roles().success)
    }
    fn status_warning(&self) -> Style {
        Style::default().fg(self.roles().warning)
    }
    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    fn accent_primary_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }

    /// `(filled, unfilled)` styles of a usage gauge.
    fn gauge_styles(&self) -> (Style, Style) {
        (self.accent_primary_style(), self.text_muted_style())
    }

    /// Colors cycled through the collaborator avatars in the top bar.
    fn collaborator_colors(&self) -> [Color; 3] {
        let roles = self.roles();
        [roles.accent_primary, roles.accent_secondary, roles.success]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{LoadedTheme, catalog};

    #[test]
    fn sidebar_sits_on_surface_and_content_on_canvas() {
        let theme = LoadedTheme::from_definition(catalog::default_truecolor()).theme;
        let roles = theme.roles();
        assert_eq!(theme.canvas_style().bg, Some(roles.background));
        assert_eq!(theme.sidebar_surface_style().bg, Some(roles.surface));
        assert_ne!(roles.background, roles.surface);
    }

    #[test]
    fn focused_border_uses_focus_color() {
        let theme = LoadedTheme::from_definition(catalog::default_truecolor()).theme;
        assert_eq!(theme.border_style(true).fg, Some(theme.roles().focus));
        assert_eq!(theme.border_style(false).fg, Some(theme.roles().border));
    }
}
