use contextflow_types::{Effect, IconRef};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::SEARCH_PLACEHOLDER;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::rect_contains;

const AVATARS: [&str; 3] = ["A", "J", "S"];

/// Top bar with the search box and account affordances.
#[derive(Debug, Default)]
pub struct TopbarComponent;

impl TopbarComponent {
    fn render_search(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let focused = app.topbar.search.is_focused();
        let block = th::card(theme, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let icon_style = if focused {
            theme.accent_primary_style()
        } else {
            theme.text_muted_style()
        };
        let icon = format!("{} ", IconRef::Search.glyph());
        let text_width = (inner.width as usize).saturating_sub(icon.width());

        let input = &app.topbar.input;
        let mut spans = vec![Span::styled(icon.clone(), icon_style)];
        let mut cursor_column = 0;
        if input.is_empty() {
            spans.push(Span::styled(SEARCH_PLACEHOLDER, theme.text_muted_style()));
        } else {
            let (visible, column) = input.visible_window(text_width);
            cursor_column = column;
            spans.push(Span::styled(visible.to_string(), theme.text_primary_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);

        if focused && inner.width > 0 {
            let x = inner.x + (icon.width() + cursor_column).min(inner.width as usize - 1) as u16;
            frame.set_cursor_position(Position::new(x, inner.y));
        }
        app.topbar.search_area = area;
    }

    fn render_account(frame: &mut Frame, areas: &[Rect], app: &App) {
        let theme = &*app.ctx.theme;
        let avatar_colors = theme.collaborator_colors();
        let mut avatars: Vec<Span> = AVATARS
            .iter()
            .zip(avatar_colors)
            .flat_map(|(initial, color)| {
                [
                    Span::styled(*initial, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                ]
            })
            .collect();
        avatars.push(Span::styled("+", theme.text_muted_style()));
        frame.render_widget(Paragraph::new(vec![Line::default(), Line::from(avatars)]), areas[0]);

        let bell = Line::from(vec![
            Span::styled(IconRef::Bell.glyph(), theme.text_secondary_style()),
            Span::styled("•", theme.status_error()),
        ]);
        frame.render_widget(Paragraph::new(vec![Line::default(), bell]), areas[1]);

        let account = vec![
            Line::default(),
            Line::from(Span::styled("Admin Workspace", theme.text_primary_style().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("Free Tier • Standard", theme.text_muted_style())),
        ];
        frame.render_widget(Paragraph::new(account), areas[2]);
    }
}

impl Component for TopbarComponent {
    /// Editing keys for the search input. Only routed here while the search
    /// leaf holds focus.
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            app.focus_sidebar();
            return Vec::new();
        }
        let input = &mut app.topbar.input;
        match key.code {
            KeyCode::Enter => {
                let query = input.input().trim().to_string();
                if !query.is_empty() {
                    return vec![Effect::SearchSubmitted(query)];
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                input.insert_char(c)
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => {}
        }
        Vec::new()
    }

    /// A left click on the search box focuses it; a left click anywhere else
    /// blurs it and hands focus back to the sidebar.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        if rect_contains(app.topbar.search_area, mouse.column, mouse.row) {
            app.focus_search();
        } else if app.topbar.search_flag.get() {
            app.focus_sidebar();
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(
            Paragraph::new("").style(app.ctx.theme.canvas_style()),
            area,
        );
        let layout = self.get_preferred_layout(app, area);
        Self::render_search(frame, layout[0], app);
        Self::render_account(frame, &layout[2..], app);
        app.topbar.last_area = area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Enter", " Search "), (" Esc", " Back to navigation ")])
    }

    /// `[search, filler, avatars, bell, account]`
    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        Layout::horizontal([
            Constraint::Length(app.topbar.search.width()),
            Constraint::Min(0),
            Constraint::Length(8),
            Constraint::Length(3),
            Constraint::Length(22),
        ])
        .split(area)
        .to_vec()
    }
}
