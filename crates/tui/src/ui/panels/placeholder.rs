use contextflow_types::{IconRef, PanelId};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::ui::theme::Theme;

/// Shared "Module Syncing" content for panels that have none of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderPanel {
    id: PanelId,
}

impl PlaceholderPanel {
    pub fn new(id: PanelId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn message(&self) -> String {
        format!(
            "{} module is being optimized for your workspace architecture. Please stand by.",
            self.id
        )
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &dyn Theme) {
        let [_, body, _] = Layout::vertical([Constraint::Fill(1), Constraint::Length(6), Constraint::Fill(1)]).areas(area);
        let [_, body, _] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Max(48), Constraint::Fill(1)]).areas(body);

        let lines = vec![
            Line::from(Span::styled(IconRef::Clock.glyph(), theme.accent_primary_style())),
            Line::default(),
            Line::from(vec![
                Span::styled("Module ", theme.text_primary_style().add_modifier(Modifier::BOLD)),
                Span::styled("Syncing", theme.accent_emphasis_style()),
            ]),
            Line::from(Span::styled(self.message(), theme.text_muted_style())),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::panels::buffer_lines;
    use crate::ui::theme::PulseTheme;

    #[test]
    fn message_names_the_panel() {
        let panel = PlaceholderPanel::new(PanelId::Insights);
        assert_eq!(
            panel.message(),
            "insights module is being optimized for your workspace architecture. Please stand by."
        );
    }

    #[test]
    fn renders_heading_and_panel_id() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        PlaceholderPanel::new(PanelId::Knowledge).render(area, &mut buf, &PulseTheme::new());
        let text = buffer_lines(&buf).join("\n");
        assert!(text.contains("Module Syncing"), "{text}");
        assert!(text.contains("knowledge module is being"), "{text}");
    }
}
