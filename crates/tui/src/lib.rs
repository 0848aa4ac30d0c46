//! # ContextFlow TUI Library
//!
//! The terminal shell for the ContextFlow workspace dashboard: a navigation
//! sidebar, a top bar with search and account affordances, and a content
//! region that animates between panels.
//!
//! ## Architecture
//!
//! - [`navigation`] holds the single active panel.
//! - [`transition`] sequences the exit and enter of the mounted panel.
//! - `ui::panels` resolves a panel id to its content.
//! - `ui::components` are the sidebar, top bar and content region. Each
//!   handles its own input and returns `Effect`s that the runtime executes.
//! - [`collaborators`] are the seams for external systems (connector
//!   authorization). Workspace data comes from a
//!   [`WorkspaceFeed`](contextflow_types::WorkspaceFeed).

mod app;
mod cmd;
pub mod collaborators;
pub mod navigation;
pub mod transition;
mod ui;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use contextflow_types::{PanelId, WorkspaceFeed, WorkspaceSnapshot};
use tracing::info;

pub use collaborators::{ConnectorAuthorizer, UnconfiguredAuthorizer};
pub use transition::MotionSettings;

/// Everything the shell needs to start.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Theme id or alias requested explicitly (CLI flag).
    pub theme: Option<String>,
    /// Theme id saved in the user's preferences.
    pub preferred_theme: Option<String>,
    pub motion: MotionSettings,
    pub feed: Arc<dyn WorkspaceFeed>,
    pub authorizer: Arc<dyn ConnectorAuthorizer>,
    /// Panel shown at startup.
    pub initial_panel: PanelId,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            theme: None,
            preferred_theme: None,
            motion: MotionSettings::default(),
            feed: Arc::new(WorkspaceSnapshot::sample()),
            authorizer: Arc::new(UnconfiguredAuthorizer),
            initial_panel: PanelId::Dashboard,
        }
    }
}

/// Runs the shell until the user quits.
///
/// # Errors
///
/// Terminal setup failures and rendering I/O errors. The terminal is
/// restored before the error is returned.
pub async fn run(config: ShellConfig) -> Result<()> {
    let theme = ui::theme::load(config.theme.as_deref(), config.preferred_theme.as_deref());
    info!(
        theme = theme.definition.id,
        theme_label = theme.definition.label,
        ansi_fallback = theme.definition.is_ansi_fallback,
        panel = %config.initial_panel,
        motion = config.motion.enabled,
        "Starting ContextFlow shell"
    );
    let ctx = app::SharedCtx::new(theme, config.feed, config.authorizer);
    let app = app::App::new(ctx, config.initial_panel, config.motion, Instant::now());
    ui::runtime::run_app(app).await
}

