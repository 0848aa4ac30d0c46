use contextflow_types::Effect;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::Color,
    text::Span,
};

use super::CursorMove;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{self as th, fade};

/// The main content region.
///
/// Draws whatever panel the transition controller has mounted, applying the
/// controller's opacity and vertical offset. Card interaction is only
/// available once the mounted panel has settled.
#[derive(Debug, Default)]
pub struct ContentComponent;

impl Component for ContentComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if !app.content_interactive() {
            return Vec::new();
        }
        let targets = app.ctx.registry.resolve(app.transition.mounted()).targets();
        if targets.is_empty() {
            return Vec::new();
        }

        let direction = match key.code {
            KeyCode::Left => CursorMove::Left,
            KeyCode::Right => CursorMove::Right,
            KeyCode::Up => CursorMove::Up,
            KeyCode::Down => CursorMove::Down,
            KeyCode::Enter => {
                return targets.get(app.content.cursor).map(|target| vec![target.effect()]).unwrap_or_default();
            }
            _ => return Vec::new(),
        };
        app.content.move_cursor(direction, targets.len());
        Vec::new()
    }

    /// A left click on a card of the settled panel activates it.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !app.content_interactive() {
            return Vec::new();
        }
        let Some(index) = app.content.card_at(mouse.column, mouse.row) else {
            return Vec::new();
        };
        let targets = app.ctx.registry.resolve(app.transition.mounted()).targets();
        let Some(target) = targets.get(index) else {
            return Vec::new();
        };
        app.content.cursor = index;
        app.focus_content();
        vec![target.effect()]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let motion = app.transition.frame(app.now);
        let theme = &*app.ctx.theme;
        let roles = theme.roles();
        let content = app.ctx.registry.resolve(motion.panel);

        let mut scratch = Buffer::empty(area);
        scratch.set_style(area, theme.canvas_style().fg(roles.text));
        let highlighted = (motion.interactive && app.content.content_flag.get()).then_some(app.content.cursor);
        let hits = content.render(area, &mut scratch, theme, highlighted, motion.reveal);

        blit_with_motion(
            frame.buffer_mut(),
            &scratch,
            area,
            motion.offset_rows,
            motion.opacity,
            roles.background,
            roles.text_muted,
        );

        app.content.last_area = area;
        if motion.interactive {
            app.content.set_card_areas(hits);
        } else {
            app.content.card_areas.clear();
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let has_targets = !app.ctx.registry.resolve(app.transition.mounted()).targets().is_empty();
        if has_targets && app.content_interactive() {
            th::build_hint_spans(&*app.ctx.theme, &[(" ←/→/↑/↓", " Choose card "), (" Enter", " Activate ")])
        } else {
            Vec::new()
        }
    }
}

/// Copies `source` into `target` shifted down by `offset` rows (up when
/// negative) with colors faded toward `background` by `opacity`. Rows with no
/// source content are cleared to the background.
fn blit_with_motion(
    target: &mut Buffer,
    source: &Buffer,
    area: Rect,
    offset: i16,
    opacity: f32,
    background: Color,
    muted: Color,
) {
    for y in area.top()..area.bottom() {
        let source_y = i32::from(y) - i32::from(offset);
        let in_source = source_y >= i32::from(area.top()) && source_y < i32::from(area.bottom());
        for x in area.left()..area.right() {
            let Some(cell) = target.cell_mut((x, y)) else {
                continue;
            };
            let source_cell = if in_source { source.cell((x, source_y as u16)) } else { None };
            match source_cell {
                Some(source_cell) => {
                    *cell = source_cell.clone();
                    cell.set_fg(fade(source_cell.fg, background, muted, opacity));
                    cell.set_bg(fade(source_cell.bg, background, background, opacity));
                }
                None => {
                    cell.reset();
                    cell.set_bg(background);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::transition::MotionSettings;
    use crate::ui::panels::buffer_lines;
    use contextflow_types::{ConnectorId, PanelId};
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend, style::Style};

    fn draw(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        let mut component = ContentComponent;
        terminal
            .draw(|frame| {
                let area = frame.area();
                component.render(frame, area, app);
            })
            .expect("draw");
        buffer_lines(terminal.backend().buffer())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn settled_connectors_panel_records_cards_and_activates() {
        let mut app = test_app(MotionSettings::disabled());
        app.select_panel(PanelId::Connectors);
        let text = draw(&mut app).join("\n");
        assert!(text.contains("Slack Workspace"));
        assert_eq!(app.content.card_areas.len(), 4);

        let mut component = ContentComponent;
        component.handle_key_events(&mut app, key(KeyCode::Right));
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::ConnectService(ConnectorId::new("notion"))]);
    }

    #[test]
    fn clicking_custom_card_requests_custom_connector() {
        let mut app = test_app(MotionSettings::disabled());
        app.select_panel(PanelId::Connectors);
        draw(&mut app);
        let custom = app.content.card_areas[3];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: custom.x + 1,
            row: custom.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        let effects = ContentComponent.handle_mouse_events(&mut app, click);
        assert_eq!(effects, vec![Effect::AddCustomConnector]);
        assert_eq!(app.content.cursor, 3);
    }

    #[test]
    fn animating_panel_is_not_interactive() {
        let mut app = test_app(MotionSettings::default());
        app.select_panel(PanelId::Connectors);
        draw(&mut app);
        assert!(app.content.card_areas.is_empty());
        let effects = ContentComponent.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
    }

    #[test]
    fn placeholder_shows_selected_panel_id() {
        let mut app = test_app(MotionSettings::disabled());
        app.select_panel(PanelId::Settings);
        let text = draw(&mut app).join("\n");
        assert!(text.contains("Module Syncing"));
        assert!(text.contains("settings module"));
    }

    #[test]
    fn blit_offsets_rows_and_clears_the_gap() {
        let area = Rect::new(0, 0, 3, 3);
        let mut source = Buffer::empty(area);
        source.set_string(0, 0, "abc", Style::default());
        let mut target = Buffer::empty(area);
        blit_with_motion(&mut target, &source, area, 1, 1.0, Color::Black, Color::Gray);
        let lines = buffer_lines(&target);
        assert_eq!(lines[0], "   ");
        assert_eq!(lines[1], "abc");
    }
}
