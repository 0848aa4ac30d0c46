use contextflow_types::{ActivityEntry, ConnectorStatus, IconRef, SummaryTile, WorkspaceFeed};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::ui::theme::{Theme, theme_helpers as th};

/// Share of the enter animation between one summary tile and the next.
const TILE_STAGGER: f32 = 0.2;

/// Whether tile `index` has appeared once the enter animation reached
/// `reveal`.
fn tile_revealed(index: usize, reveal: f32) -> bool {
    reveal >= index as f32 * TILE_STAGGER
}

/// "Workspace Pulse": headline tiles, the activity feed and connector status.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPanel {
    pub tiles: [SummaryTile; 3],
    pub activity: Vec<ActivityEntry>,
    pub connectors: Vec<ConnectorStatus>,
}

impl DashboardPanel {
    pub fn from_feed(feed: &dyn WorkspaceFeed) -> Self {
        Self {
            tiles: feed.summary_tiles(),
            activity: feed.activity(),
            connectors: feed.connector_statuses(),
        }
    }

    /// Summary tiles come in left to right as `reveal` goes from 0.0 to 1.0.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &dyn Theme, reveal: f32) {
        let [header, tiles, body] = Layout::vertical([Constraint::Length(3), Constraint::Length(5), Constraint::Min(0)])
            .horizontal_margin(2)
            .areas(area);

        render_heading(
            header,
            buf,
            theme,
            ("Workspace ", "Pulse"),
            "Real-time status of your connected knowledge ecosystem.",
        );
        self.render_tiles(tiles, buf, theme, reveal);

        let [feed, grid] = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .spacing(1)
            .areas(body);
        self.render_feed(feed, buf, theme);
        self.render_connectors(grid, buf, theme);
    }

    fn render_tiles(&self, area: Rect, buf: &mut Buffer, theme: &dyn Theme, reveal: f32) {
        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).spacing(1).split(area);
        for (index, (tile, tile_area)) in self.tiles.iter().zip(columns.iter().copied()).enumerate() {
            if !tile_revealed(index, reveal) {
                continue;
            }
            let accent = th::accent_color(theme, &tile.accent);
            let block = th::card(theme, false);
            let inner = block.inner(tile_area);
            block.render(tile_area, buf);

            let [label_row, value_row, sub_row] =
                Layout::vertical([Constraint::Length(1); 3]).areas(inner);
            let [label_area, badge_area] = Layout::horizontal([Constraint::Min(0), Constraint::Length(6)]).areas(label_row);

            Line::from(vec![
                Span::styled(format!("{} ", tile.icon.glyph()), Style::default().fg(accent)),
                Span::styled(tile.label.as_str(), theme.text_secondary_style()),
            ])
            .render(label_area, buf);
            Line::from(Span::styled(" LIVE ", th::badge_style(theme))).render(badge_area, buf);
            Line::from(Span::styled(
                tile.value.as_str(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .render(value_row, buf);
            Line::from(Span::styled(tile.sub.as_str(), theme.text_muted_style())).render(sub_row, buf);
        }
    }

    fn render_feed(&self, area: Rect, buf: &mut Buffer, theme: &dyn Theme) {
        let title = format!(" {} Context Flow ", IconRef::Command.glyph());
        let block = th::block(theme, Some(title.as_str()), false).border_type(ratatui::widgets::BorderType::Rounded);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::with_capacity(self.activity.len() * 3);
        for entry in &self.activity {
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", entry.source_initial()), th::badge_style(theme)),
                Span::raw(" "),
                Span::styled(entry.title.as_str(), theme.text_primary_style().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(entry.relative_time.as_str(), theme.text_muted_style()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {} • By {}", entry.source_label, entry.actor_name).to_uppercase(),
                theme.text_muted_style(),
            )));
            lines.push(Line::default());
        }
        Paragraph::new(lines).render(inner.inner(ratatui::layout::Margin::new(1, 1)), buf);
    }

    fn render_connectors(&self, area: Rect, buf: &mut Buffer, theme: &dyn Theme) {
        let block = th::block(theme, Some(" Connected Connectors "), false)
            .border_type(ratatui::widgets::BorderType::Rounded);
        let inner = block.inner(area).inner(ratatui::layout::Margin::new(1, 0));
        block.render(area, buf);

        let [caption, grid] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
        Paragraph::new(Span::styled(
            "Manage authorization for your data sources.",
            theme.text_muted_style(),
        ))
        .wrap(Wrap { trim: true })
        .render(caption, buf);

        let rows = self.connectors.len().div_ceil(2);
        let row_areas = Layout::vertical(vec![Constraint::Length(3); rows]).split(grid);
        for (row_index, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::horizontal([Constraint::Ratio(1, 2); 2]).spacing(1).split(*row_area);
            for (column, cell) in cells.iter().enumerate() {
                let Some(status) = self.connectors.get(row_index * 2 + column) else {
                    continue;
                };
                render_status(status, *cell, buf, theme);
            }
        }
    }
}

fn render_status(status: &ConnectorStatus, area: Rect, buf: &mut Buffer, theme: &dyn Theme) {
    let (tone, mark) = if status.active {
        (theme.accent_primary_style(), "✓")
    } else {
        (theme.text_muted_style(), "✗")
    };
    let block = th::card(theme, status.active);
    let inner = block.inner(area);
    block.render(area, buf);
    Line::from(vec![
        Span::styled(format!("{} ", status.icon.glyph()), tone),
        Span::styled(status.name.as_str(), theme.text_primary_style().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(status.status.to_uppercase(), tone),
        Span::raw(" "),
        Span::styled(mark, tone),
    ])
    .render(inner, buf);
}

/// Two-tone heading with a muted caption underneath.
pub(super) fn render_heading(area: Rect, buf: &mut Buffer, theme: &dyn Theme, title: (&str, &str), caption: &str) {
    let lines = vec![
        Line::from(vec![
            Span::styled(title.0, theme.text_primary_style().add_modifier(Modifier::BOLD)),
            Span::styled(title.1, theme.accent_emphasis_style()),
        ]),
        Line::from(Span::styled(caption, theme.text_muted_style())),
    ];
    Paragraph::new(lines).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::panels::buffer_lines;
    use crate::ui::theme::PulseTheme;
    use contextflow_types::WorkspaceSnapshot;

    fn rendered_at(width: u16, height: u16, reveal: f32) -> (DashboardPanel, Vec<String>) {
        let panel = DashboardPanel::from_feed(&WorkspaceSnapshot::sample());
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf, &PulseTheme::new(), reveal);
        (panel, buffer_lines(&buf))
    }

    fn rendered(width: u16, height: u16) -> (DashboardPanel, Vec<String>) {
        rendered_at(width, height, 1.0)
    }

    #[test]
    fn sample_dashboard_has_expected_sections() {
        let (panel, _) = rendered(120, 30);
        assert_eq!(panel.tiles.len(), 3);
        assert_eq!(panel.activity.len(), 3);
        assert_eq!(panel.connectors.len(), 4);
    }

    #[test]
    fn renders_tiles_feed_and_grid() {
        let (_, lines) = rendered(120, 30);
        let text = lines.join("\n");
        for expected in [
            "Workspace Pulse",
            "Total Index",
            "14,281",
            "+241 today",
            "Sync Status",
            "Optimal",
            "Active Query",
            "LIVE",
            "Context Flow",
            "Project X Roadmap",
            "Marketing Feedback",
            "Financial Report v2",
            "Connected Connectors",
            "Slack",
            "G-Drive",
            "PAUSED",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in\n{text}");
        }
    }

    #[test]
    fn tiles_enter_one_after_another() {
        let text = |reveal: f32| rendered_at(120, 30, reveal).1.join("\n");

        let first_only = text(0.1);
        assert!(first_only.contains("Total Index"));
        assert!(!first_only.contains("Sync Status"));
        assert!(!first_only.contains("Active Query"));
        // The rest of the panel is not staggered.
        assert!(first_only.contains("Project X Roadmap"));

        let two = text(0.3);
        assert!(two.contains("Sync Status"));
        assert!(!two.contains("Active Query"));

        assert!(text(0.4).contains("Active Query"));
    }

    #[test]
    fn feed_keeps_source_order() {
        let (_, lines) = rendered(120, 30);
        let row_of = |needle: &str| lines.iter().position(|line| line.contains(needle));
        let first = row_of("Project X Roadmap").expect("first entry");
        let second = row_of("Marketing Feedback").expect("second entry");
        let third = row_of("Financial Report v2").expect("third entry");
        assert!(first < second && second < third);
    }
}
