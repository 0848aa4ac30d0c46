//! Application state for the ContextFlow shell.
//!
//! [`App`] owns every piece of mutable shell state: the navigation model,
//! the transition controller, the per-region component states and the focus
//! ring. Components receive `&mut App` in their handlers; the runtime applies
//! the effects they return.

use std::sync::Arc;
use std::time::{Duration, Instant};

use contextflow_types::{AuthOutcome, Effect, Msg, PanelId, WorkspaceFeed};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::collaborators::ConnectorAuthorizer;
use crate::navigation::NavigationModel;
use crate::transition::{MotionSettings, TransitionController, TransitionEvent, ease_out};
use crate::ui::components::content::ContentState;
use crate::ui::components::sidebar::SidebarState;
use crate::ui::components::topbar::TopbarState;
use crate::ui::panels::PanelRegistry;
use crate::ui::theme::{LoadedTheme, Theme};

/// Cross-cutting shared context owned by the App.
///
/// Holds runtime-wide objects like the theme, panel registry and
/// collaborators. This avoids threading multiple references through
/// components and helps reduce borrow complexity.
pub struct SharedCtx {
    /// Active UI theme
    pub theme: Box<dyn Theme>,
    /// Canonical identifier of the active theme
    pub theme_id: &'static str,
    /// Panel content resolver backed by the workspace feed
    pub registry: PanelRegistry,
    /// Connector authorization collaborator
    pub authorizer: Arc<dyn ConnectorAuthorizer>,
}

impl SharedCtx {
    pub fn new(theme: LoadedTheme, feed: Arc<dyn WorkspaceFeed>, authorizer: Arc<dyn ConnectorAuthorizer>) -> Self {
        Self {
            theme_id: theme.definition.id,
            theme: theme.theme,
            registry: PanelRegistry::new(feed),
            authorizer,
        }
    }
}

impl std::fmt::Debug for SharedCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCtx")
            .field("theme_id", &self.theme_id)
            .field("registry", &self.registry)
            .field("authorizer", &self.authorizer)
            .finish()
    }
}

/// Which top-level region holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Sidebar,
    Search,
    Content,
}

impl Region {
    const RING: [Region; 3] = [Region::Sidebar, Region::Search, Region::Content];

    fn step(self, forward: bool) -> Region {
        let index = Self::RING.iter().position(|region| *region == self).unwrap_or(0);
        let len = Self::RING.len();
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Self::RING[next]
    }
}

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

/// Time the plan usage gauge takes to fill after startup.
pub const GAUGE_GROWTH: Duration = Duration::from_millis(1200);

/// Styling hint for a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Success,
    Error,
}

/// A transient line in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
    /// When the message was posted; it expires [`STATUS_TTL`] later.
    pub set_at: Instant,
}

/// The main application state.
#[derive(Debug)]
pub struct App {
    /// Shared, cross-cutting context (theme, registry, collaborators)
    pub ctx: SharedCtx,
    /// The single active panel
    pub navigation: NavigationModel,
    /// Exit/enter sequencing of the mounted panel
    pub transition: TransitionController,
    pub sidebar: SidebarState,
    pub topbar: TopbarState,
    pub content: ContentState,
    /// Focus ring over sidebar items, the search input and the content region
    pub focus: Focus,
    /// Transient status line for collaborator outcomes
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    /// Timestamp of the event being processed; drives transition progress.
    pub now: Instant,
    /// When the shell started; drives the startup gauge animation.
    pub started_at: Instant,
    focus_flag: FocusFlag,
}

impl App {
    pub fn new(ctx: SharedCtx, initial: PanelId, motion: MotionSettings, now: Instant) -> Self {
        let mut app = Self {
            ctx,
            navigation: NavigationModel::new(initial),
            transition: TransitionController::new(initial, motion, now),
            sidebar: SidebarState::default(),
            topbar: TopbarState::default(),
            content: ContentState::default(),
            focus: Focus::default(),
            status: None,
            should_quit: false,
            now,
            started_at: now,
            focus_flag: FocusFlag::named("contextflow.app"),
        };
        app.focus = FocusBuilder::build_for(&app);
        app.focus_sidebar();
        app.sync_search_focus();
        app
    }

    /// Makes `id` the active panel and starts its transition. Returns `false`
    /// when `id` was already active; nothing is restarted in that case.
    pub fn select_panel(&mut self, id: PanelId) -> bool {
        if !self.navigation.select(id) {
            return false;
        }
        info!(panel = %id, "Panel selected");
        let events = self.transition.request(id, self.now);
        self.apply_transition_events(events);
        // Keep keyboard focus on the highlighted item.
        if self.focused_region() == Region::Sidebar {
            self.focus_sidebar();
        }
        true
    }

    /// Handles a runtime message.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                let events = self.transition.tick(self.now);
                self.apply_transition_events(events);
                self.expire_status();
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
            }
            Msg::ConnectorAuthCompleted { connector, outcome } => {
                info!(connector = %connector, outcome = ?outcome, "Connector authorization finished");
                let (text, tone) = match outcome {
                    AuthOutcome::Authorized => (format!("{connector} connected"), StatusTone::Success),
                    AuthOutcome::Denied(reason) => {
                        (format!("{connector} authorization denied: {reason}"), StatusTone::Error)
                    }
                    AuthOutcome::NotConfigured => (
                        format!("No authorization provider is configured for {connector}"),
                        StatusTone::Neutral,
                    ),
                };
                self.set_status_with_tone(text, tone);
            }
        }
        Vec::new()
    }

    fn apply_transition_events(&mut self, events: Vec<TransitionEvent>) {
        for event in events {
            match event {
                TransitionEvent::Unmounted(panel) => debug!(panel = %panel, "Panel unmounted"),
                TransitionEvent::Mounted(panel) => {
                    debug!(panel = %panel, "Panel mounted");
                    self.content.reset_for_mount();
                }
                TransitionEvent::Settled(panel) => debug!(panel = %panel, "Panel settled"),
            }
        }
    }

    /// Derives the search field's focus/blur events from the focus ring.
    /// Call after anything that may have moved focus.
    pub fn sync_search_focus(&mut self) -> bool {
        self.topbar.sync_search_focus()
    }

    /// Fill fraction of the plan usage gauge, eased from 0.0 to 1.0 over
    /// [`GAUGE_GROWTH`]. Always 1.0 with motion disabled.
    pub fn gauge_progress(&self) -> f64 {
        if !self.transition.settings().enabled {
            return 1.0;
        }
        let elapsed = self.now.saturating_duration_since(self.started_at);
        f64::from(ease_out(elapsed.as_secs_f32() / GAUGE_GROWTH.as_secs_f32()))
    }

    /// Whether anything on screen is still moving.
    pub fn is_animating(&self) -> bool {
        self.transition.is_animating() || self.gauge_progress() < 1.0
    }

    /// Whether the mounted panel accepts input.
    pub fn content_interactive(&self) -> bool {
        self.transition.frame(self.now).interactive
    }

    pub fn focused_region(&self) -> Region {
        if self.topbar.search_flag.get() {
            Region::Search
        } else if self.content.content_flag.get() {
            Region::Content
        } else {
            Region::Sidebar
        }
    }

    /// Moves focus to the next (or previous) region of the ring.
    pub fn cycle_region(&mut self, forward: bool) {
        match self.focused_region().step(forward) {
            Region::Sidebar => self.focus_sidebar(),
            Region::Search => self.focus_search(),
            Region::Content => self.focus_content(),
        }
    }

    /// Focuses the sidebar item of the active panel.
    pub fn focus_sidebar(&mut self) {
        if let Some(flag) = self.sidebar.flag_for(self.navigation.current()) {
            self.focus.focus(flag);
        }
    }

    pub fn focus_search(&mut self) {
        self.focus.focus(&self.topbar.search_flag);
    }

    pub fn focus_content(&mut self) {
        self.focus.focus(&self.content.content_flag);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.set_status_with_tone(status, StatusTone::Neutral);
    }

    pub fn set_status_with_tone(&mut self, status: impl Into<String>, tone: StatusTone) {
        self.status = Some(StatusMessage {
            text: status.into(),
            tone,
            set_at: self.now,
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Drops the status message once it has been shown for [`STATUS_TTL`].
    fn expire_status(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| self.now.saturating_duration_since(status.set_at) >= STATUS_TTL)
        {
            debug!("Status message expired");
            self.status = None;
        }
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.widget(&self.sidebar);
        builder.widget(&self.topbar);
        builder.widget(&self.content);
    }

    fn focus(&self) -> FocusFlag {
        self.focus_flag.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
pub(crate) fn test_app(motion: MotionSettings) -> App {
    use crate::collaborators::UnconfiguredAuthorizer;
    use crate::ui::theme::{LoadedTheme, catalog};
    use contextflow_types::WorkspaceSnapshot;

    let ctx = SharedCtx::new(
        LoadedTheme::from_definition(catalog::default_truecolor()),
        Arc::new(WorkspaceSnapshot::sample()),
        Arc::new(UnconfiguredAuthorizer),
    );
    App::new(ctx, PanelId::Dashboard, motion, Instant::now())
}
