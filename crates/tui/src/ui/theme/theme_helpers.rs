use contextflow_types::parse_hex_rgb;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Rounded "glass" card used by tiles, sections and connector cards.
pub fn card<'a, T: Theme + ?Sized>(theme: &T, highlighted: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(highlighted))
        .style(panel_style(theme))
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Small uppercase badge (e.g. "LIVE").
pub fn badge_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles {
        surface_muted, text_secondary, ..
    } = *theme.roles();
    Style::default()
        .bg(surface_muted)
        .fg(text_secondary)
        .add_modifier(Modifier::BOLD)
}

/// Builds `key description` hint pairs for the hints bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}

/// Resolves a `#RRGGBB` accent for display. Falls back to the theme accent
/// when the terminal cannot show RGB or the color would vanish against the
/// background.
pub fn accent_color<T: Theme + ?Sized>(theme: &T, hex: &str) -> Color {
    let fallback = theme.roles().accent_primary;
    if !theme.supports_truecolor() {
        return fallback;
    }
    let Some((r, g, b)) = parse_hex_rgb(hex) else {
        return fallback;
    };
    let candidate = Color::Rgb(r, g, b);
    match theme.roles().background {
        Color::Rgb(br, bg, bb) if (luminance(r, g, b) - luminance(br, bg, bb)).abs() < 0.12 => fallback,
        _ => candidate,
    }
}

/// Moves `color` toward `background` as `opacity` drops from 1.0 to 0.0.
///
/// Non-RGB colors cannot be interpolated; they switch to `muted` below half
/// opacity and disappear into the background below a tenth.
pub fn fade(color: Color, background: Color, muted: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity >= 1.0 {
        return color;
    }
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            Color::Rgb(lerp(br, r, opacity), lerp(bg, g, opacity), lerp(bb, b, opacity))
        }
        _ if opacity < 0.1 => background,
        _ if opacity < 0.5 => muted,
        _ => color,
    }
}

fn lerp(from: u8, to: u8, t: f32) -> u8 {
    let value = from as f32 + (to as f32 - from as f32) * t;
    value.round().clamp(0.0, 255.0) as u8
}

fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{Ansi256Theme, PulseTheme};

    #[test]
    fn fade_interpolates_rgb() {
        let white = Color::Rgb(255, 255, 255);
        let black = Color::Rgb(0, 0, 0);
        assert_eq!(fade(white, black, Color::Gray, 1.0), white);
        assert_eq!(fade(white, black, Color::Gray, 0.0), black);
        assert_eq!(fade(white, black, Color::Gray, 0.5), Color::Rgb(128, 128, 128));
    }

    #[test]
    fn fade_steps_indexed_colors() {
        let bg = Color::Indexed(232);
        assert_eq!(fade(Color::Indexed(255), bg, Color::Indexed(244), 0.8), Color::Indexed(255));
        assert_eq!(fade(Color::Indexed(255), bg, Color::Indexed(244), 0.3), Color::Indexed(244));
        assert_eq!(fade(Color::Indexed(255), bg, Color::Indexed(244), 0.05), bg);
    }

    #[test]
    fn accent_color_falls_back_for_invisible_or_ansi() {
        let dark = PulseTheme::new();
        assert_eq!(accent_color(&dark, "#4285F4"), Color::Rgb(0x42, 0x85, 0xF4));
        // Pure black on the near-black Pulse background would be invisible.
        assert_eq!(accent_color(&dark, "#000000"), dark.roles().accent_primary);
        assert_eq!(accent_color(&dark, "nope"), dark.roles().accent_primary);

        let ansi = Ansi256Theme::new();
        assert_eq!(accent_color(&ansi, "#4285F4"), ansi.roles().accent_primary);
    }
}
