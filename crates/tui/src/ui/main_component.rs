//! The shell: lays out the sidebar, top bar, content region and hints bar,
//! and routes input to whichever region holds focus.

use contextflow_types::{Effect, Msg};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::components::{Component, ContentComponent, SidebarComponent, TopbarComponent};
use super::theme::theme_helpers as th;
use crate::app::{App, Region, StatusTone};

const SIDEBAR_WIDTH: u16 = 26;
const TOPBAR_HEIGHT: u16 = 3;

#[derive(Debug, Default)]
pub struct MainView {
    pub sidebar_view: SidebarComponent,
    pub topbar_view: TopbarComponent,
    pub content_view: ContentComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcuts that apply regardless of the focused region. Returns `None`
    /// when the key was not a global shortcut.
    fn handle_global_keys(&mut self, app: &mut App, key: KeyEvent) -> Option<Vec<Effect>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(vec![Effect::Quit]);
        }
        match key.code {
            KeyCode::Tab => {
                app.cycle_region(true);
                return Some(Vec::new());
            }
            KeyCode::BackTab => {
                app.cycle_region(false);
                return Some(Vec::new());
            }
            _ => {}
        }

        // Plain characters belong to the search input while it has focus.
        if app.focused_region() == Region::Search || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => Some(vec![Effect::Quit]),
            KeyCode::Char('/') => {
                app.focus_search();
                Some(Vec::new())
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                let item = app.sidebar.items.get(index).copied()?;
                Some(vec![Effect::SelectPanel(item.id)])
            }
            _ => None,
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let status = app.status_text().unwrap_or_default();
        let [hints_area, status_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(status.width() as u16 + 1)]).areas(area);

        let hint_spans = self.get_hint_spans(app);
        frame.render_widget(
            Paragraph::new(Line::from(hint_spans)).style(theme.text_muted_style()),
            hints_area,
        );
        if let Some(message) = &app.status {
            let style = match message.tone {
                StatusTone::Neutral => theme.status_warning(),
                StatusTone::Success => theme.status_success(),
                StatusTone::Error => theme.status_error(),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(status, style))
                    .alignment(Alignment::Right)
                    .wrap(Wrap { trim: true }),
                status_area,
            );
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);
        effects.extend(self.content_view.handle_message(app, msg));
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let effects = match self.handle_global_keys(app, key) {
            Some(effects) => effects,
            None => match app.focused_region() {
                Region::Sidebar => self.sidebar_view.handle_key_events(app, key),
                Region::Search => self.topbar_view.handle_key_events(app, key),
                Region::Content => self.content_view.handle_key_events(app, key),
            },
        };
        app.sync_search_focus();
        effects
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        effects.extend(self.sidebar_view.handle_mouse_events(app, mouse));
        effects.extend(self.topbar_view.handle_mouse_events(app, mouse));
        effects.extend(self.content_view.handle_mouse_events(app, mouse));
        app.sync_search_focus();
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(app.ctx.theme.canvas_style());
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.sidebar_view.render(frame, layout[0], app);
        self.topbar_view.render(frame, layout[1], app);
        self.content_view.render(frame, layout[2], app);
        self.render_hints(frame, layout[3], app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        match app.focused_region() {
            Region::Sidebar => hint_spans.extend(self.sidebar_view.get_hint_spans(app)),
            Region::Search => {
                hint_spans.extend(self.topbar_view.get_hint_spans(app));
                return hint_spans;
            }
            Region::Content => hint_spans.extend(self.content_view.get_hint_spans(app)),
        }
        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[(" Tab", " Focus "), (" 1-5", " Panels "), (" /", " Search "), (" q", " Quit ")],
        ));
        hint_spans
    }

    /// `[sidebar, topbar, content, hints]`
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let [sidebar, main] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)]).areas(area);
        let [topbar, content, hints] = Layout::vertical([
            Constraint::Length(TOPBAR_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .horizontal_margin(1)
        .areas(main);
        vec![sidebar, topbar, content, hints]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::transition::{MotionSettings, TransitionPhase};
    use crate::ui::panels::buffer_lines;
    use crate::ui::runtime::handle_navigation_effects;
    use contextflow_types::PanelId;
    use crossterm::event::{MouseButton, MouseEventKind};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(view: &mut MainView, app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, app);
            })
            .expect("draw");
        buffer_lines(terminal.backend().buffer()).join("\n")
    }

    fn click_sidebar_item(view: &mut MainView, app: &mut App, index: usize) {
        let row = app.sidebar.per_item_areas[index];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: row.x + 2,
            row: row.y,
            modifiers: KeyModifiers::NONE,
        };
        let mut effects = view.handle_mouse_events(app, click);
        handle_navigation_effects(app, &mut effects);
        assert!(effects.is_empty());
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn startup_mounts_dashboard() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::default());
        let text = draw(&mut view, &mut app);
        assert_eq!(app.navigation.current(), PanelId::Dashboard);
        assert_eq!(app.transition.mounted(), PanelId::Dashboard);
        for expected in ["ContextFlow", "Knowledge Base", "AI Insights", "Workspace Pulse", "PRO PLAN", "Admin Workspace"] {
            assert!(text.contains(expected), "missing {expected:?}");
        }
    }

    #[test]
    fn clicking_connectors_mounts_offer_grid() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        draw(&mut view, &mut app);
        click_sidebar_item(&mut view, &mut app, 1);
        assert_eq!(app.navigation.current(), PanelId::Connectors);
        let text = draw(&mut view, &mut app);
        assert!(text.contains("Add Intelligence"));
        assert_eq!(app.content.card_areas.len(), 4);
    }

    #[test]
    fn clicking_remaining_items_mounts_placeholder() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        draw(&mut view, &mut app);
        for (index, id) in [(2, PanelId::Knowledge), (3, PanelId::Insights), (4, PanelId::Settings)] {
            click_sidebar_item(&mut view, &mut app, index);
            assert_eq!(app.transition.phase(), TransitionPhase::Idle(id));
            let text = draw(&mut view, &mut app);
            assert!(text.contains(&format!("{id} module is being")), "placeholder for {id}");
        }
    }

    #[test]
    fn slash_focuses_search_and_escape_blurs_it() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        view.handle_key_events(&mut app, key(KeyCode::Char('/')));
        assert!(app.topbar.search.is_focused());

        // Digits are text while searching.
        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('2')));
        assert!(effects.is_empty());
        assert_eq!(app.topbar.input.input(), "2");

        view.handle_key_events(&mut app, key(KeyCode::Esc));
        assert!(!app.topbar.search.is_focused());
        assert_eq!(app.navigation.current(), PanelId::Dashboard);
    }

    #[test]
    fn number_keys_select_panels() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        let mut effects = view.handle_key_events(&mut app, key(KeyCode::Char('4')));
        assert_eq!(effects, vec![Effect::SelectPanel(PanelId::Insights)]);
        handle_navigation_effects(&mut app, &mut effects);
        assert_eq!(app.navigation.current(), PanelId::Insights);
    }

    #[test]
    fn enter_after_number_key_keeps_new_panel() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        let mut effects = view.handle_key_events(&mut app, key(KeyCode::Char('2')));
        handle_navigation_effects(&mut app, &mut effects);
        assert_eq!(app.navigation.current(), PanelId::Connectors);
        assert_eq!(app.sidebar.focused_index(), Some(1));

        let effects = view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(!effects.contains(&Effect::SelectPanel(PanelId::Dashboard)));
    }

    #[test]
    fn clicking_outside_search_blurs_it() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        draw(&mut view, &mut app);
        app.focus_search();
        view.handle_key_events(&mut app, key(KeyCode::Char('x')));
        assert!(app.topbar.search.is_focused());

        // The hints bar on the bottom row.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row: 39,
            modifiers: KeyModifiers::NONE,
        };
        view.handle_mouse_events(&mut app, click);
        assert!(!app.topbar.search.is_focused());
        assert_eq!(app.focused_region(), Region::Sidebar);
        assert_eq!(app.topbar.input.input(), "x");
    }

    #[test]
    fn status_renders_until_it_expires() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        app.set_status("Connecting slack...");
        assert!(draw(&mut view, &mut app).contains("Connecting slack..."));

        app.now += crate::app::STATUS_TTL;
        view.handle_message(&mut app, &Msg::Tick);
        assert!(!draw(&mut view, &mut app).contains("Connecting slack..."));
    }

    #[test]
    fn search_submit_emits_query() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        app.focus_search();
        for c in "roadmap".chars() {
            view.handle_key_events(&mut app, key(KeyCode::Char(c)));
        }
        let effects = view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::SearchSubmitted("roadmap".into())]);
    }

    #[test]
    fn quit_shortcuts() {
        let mut view = MainView::new();
        let mut app = test_app(MotionSettings::disabled());
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.focus_search();
        assert_eq!(view.handle_key_events(&mut app, ctrl_c), vec![Effect::Quit]);
    }
}
