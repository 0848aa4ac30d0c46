use contextflow_types::Effect;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Borders, LineGauge, Paragraph},
};

use super::SidebarState;
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::theme_helpers as th;

/// Storage usage shown on the plan card.
const PLAN_USED_GB: f64 = 8.4;
const PLAN_TOTAL_GB: f64 = 10.0;

/// Gauge fill for the plan card; `progress` scales it up from empty.
fn plan_gauge_ratio(progress: f64) -> f64 {
    (PLAN_USED_GB / PLAN_TOTAL_GB * progress).clamp(0.0, 1.0)
}

/// The persistent navigation sidebar.
///
/// Renders the brand header, one row per navigation item and the plan card.
/// Selecting an item (Enter or left click) emits [`Effect::SelectPanel`];
/// the runtime applies it to the navigation model.
#[derive(Debug, Default)]
pub struct SidebarComponent;

impl SidebarComponent {
    fn render_brand(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let brand = Line::from(vec![
            Span::styled(" ◆ ", theme.accent_primary_style()),
            Span::styled("Context", theme.text_primary_style().add_modifier(Modifier::BOLD)),
            Span::styled("Flow", theme.accent_emphasis_style()),
        ]);
        frame.render_widget(Paragraph::new(vec![Line::default(), brand]), area);
    }

    fn render_plan_card(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let block = th::card(theme, false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let header = Line::from(vec![
            Span::styled("PRO PLAN", theme.accent_emphasis_style()),
            Span::raw(" "),
            Span::styled("Manage Billing", theme.text_muted_style().add_modifier(Modifier::UNDERLINED)),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        let ratio = plan_gauge_ratio(app.gauge_progress());
        let (filled, unfilled) = theme.gauge_styles();
        let gauge = LineGauge::default()
            .ratio(ratio)
            .label(Span::styled(format!("{:.0}%", ratio * 100.0), theme.text_secondary_style()))
            .filled_style(filled)
            .unfilled_style(unfilled);
        frame.render_widget(gauge, rows[1]);

        let usage = Line::from(Span::styled(
            format!("{PLAN_USED_GB} GB Used / {PLAN_TOTAL_GB} GB Total"),
            theme.text_muted_style(),
        ));
        frame.render_widget(Paragraph::new(usage), rows[2]);
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        // Ensure a valid child focus before cycling
        if app.sidebar.focused_index().is_none() {
            app.focus_sidebar();
        }

        let mut effects = vec![];
        match key.code {
            KeyCode::Down => {
                if let Some(flag) = app.sidebar.cycle_focus(true) {
                    app.focus.by_widget_id(flag.widget_id());
                }
            }
            KeyCode::Up => {
                if let Some(flag) = app.sidebar.cycle_focus(false) {
                    app.focus.by_widget_id(flag.widget_id());
                }
            }
            KeyCode::Enter => {
                if let Some(item) = app.sidebar.get_focused_item() {
                    effects.push(Effect::SelectPanel(item.id));
                }
            }
            _ => {}
        }
        effects
    }

    /// Left clicks on an item select its panel and move focus to it.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let SidebarState {
            last_area, per_item_areas, ..
        } = &app.sidebar;
        let Some(idx) = find_target_index_by_mouse_position(last_area, per_item_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };

        let mut effects = vec![];
        if let Some(item) = app.sidebar.items.get(idx).copied() {
            effects.push(Effect::SelectPanel(item.id));
        }
        if let Some(flag) = app.sidebar.item_focus_flags.get(idx).cloned() {
            app.focus.focus(&flag);
        }
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let container_focused = app.sidebar.focused_index().is_some();
        let block = th::block(theme, None, container_focused)
            .borders(Borders::RIGHT)
            .style(theme.sidebar_surface_style());
        frame.render_widget(block, area);

        let layout = self.get_preferred_layout(app, area);
        let (brand_area, rest) = (layout[0], &layout[1..]);
        Self::render_brand(frame, brand_area, app);

        let item_count = app.sidebar.items.len();
        let item_areas = &rest[..item_count.min(rest.len())];
        let active = app.navigation.current();
        for (index, item) in app.sidebar.items.iter().enumerate() {
            let Some(row_area) = item_areas.get(index).copied() else {
                break;
            };
            let is_active = item.id == active;
            let is_focused = app.sidebar.item_focus_flags.get(index).is_some_and(|flag| flag.get());

            let row_style = if is_active {
                theme.selection_style()
            } else {
                theme.text_secondary_style()
            };
            let marker = if is_focused { "›" } else { " " };
            let line = Line::from(vec![
                Span::styled(marker, theme.focus_marker_style()),
                Span::styled(format!(" {} ", item.icon.glyph()), row_style),
                Span::styled(item.label, row_style),
            ]);
            frame.render_widget(Paragraph::new(line).style(row_style), row_area);
        }

        if let Some(plan_area) = rest.get(item_count + 1).copied() {
            Self::render_plan_card(frame, plan_area, app);
        }

        app.sidebar.last_area = area;
        app.sidebar.per_item_areas = item_areas.to_vec();
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Enter", " Open panel "), (" ↑/↓", " Navigate ")])
    }

    /// `[brand, item rows.., filler, plan card]`
    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let inner = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        let row_count = app.sidebar.items.len();
        let mut constraints = Vec::with_capacity(row_count + 3);
        constraints.push(Constraint::Length(3));
        constraints.extend(vec![Constraint::Length(1); row_count]);
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(5));
        Layout::vertical(constraints).horizontal_margin(1).split(inner).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{GAUGE_GROWTH, test_app};
    use crate::transition::MotionSettings;
    use crate::ui::panels::buffer_lines;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(26, 20)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                SidebarComponent.render(frame, area, app);
            })
            .expect("draw");
        buffer_lines(terminal.backend().buffer()).join("\n")
    }

    #[test]
    fn plan_gauge_grows_from_empty() {
        let mut app = test_app(MotionSettings::default());
        assert!(draw(&mut app).contains("0%"));

        app.now += GAUGE_GROWTH;
        assert!(draw(&mut app).contains("84%"));
    }

    #[test]
    fn plan_gauge_ratio_scales_with_progress() {
        assert_eq!(plan_gauge_ratio(0.0), 0.0);
        assert!((plan_gauge_ratio(1.0) - 0.84).abs() < 1e-9);
        assert!(plan_gauge_ratio(0.5) < plan_gauge_ratio(1.0));
    }
}
