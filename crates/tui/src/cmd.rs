//! # Effect Execution Layer
//!
//! Translates the [`Effect`]s components return into side effects: state
//! changes on [`App`] that are not a component's own business, and
//! background tasks for external collaborators.
//!
//! Work that completes synchronously is reported through
//! [`CommandBatch::immediate`]; collaborator calls are spawned and their
//! handles returned in [`CommandBatch::pending`] so the runtime can await
//! them without blocking input.

use contextflow_types::{ConnectorId, Effect, Msg};
use tokio::task::{JoinHandle, spawn};
use tracing::info;

use crate::app::App;

/// Result of executing a batch of effects.
#[derive(Debug, Default)]
pub struct CommandBatch {
    /// Messages to deliver to the app right away.
    pub immediate: Vec<Msg>,
    /// Collaborator tasks that resolve to a message.
    pub pending: Vec<JoinHandle<Msg>>,
}

/// Executes `effects` against `app`.
///
/// Must be called from within a Tokio runtime when the batch contains
/// [`Effect::ConnectService`].
pub fn run_from_effects(app: &mut App, effects: Vec<Effect>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for effect in effects {
        match effect {
            Effect::SelectPanel(panel) => {
                app.select_panel(panel);
            }
            Effect::ConnectService(connector) => {
                batch.pending.push(spawn_authorization(app, connector));
            }
            Effect::AddCustomConnector => {
                info!("Custom API connector requested");
                app.set_status("Custom API connectors are not available in this workspace yet");
            }
            Effect::SearchSubmitted(query) => {
                info!(query = %query, "Search submitted");
                app.set_status(format!("Search is not connected: \"{query}\""));
            }
            Effect::Quit => {
                info!("Quit requested");
                app.should_quit = true;
            }
        }
    }
    batch
}

fn spawn_authorization(app: &mut App, connector: ConnectorId) -> JoinHandle<Msg> {
    info!(connector = %connector, "Starting connector authorization");
    app.set_status(format!("Connecting {connector}..."));
    let authorizer = app.ctx.authorizer.clone();
    spawn(async move {
        let outcome = authorizer.authorize(&connector).await;
        Msg::ConnectorAuthCompleted { connector, outcome }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::transition::MotionSettings;
    use contextflow_types::{AuthOutcome, PanelId};

    #[tokio::test]
    async fn connect_service_spawns_authorization() {
        let mut app = test_app(MotionSettings::disabled());
        let batch = run_from_effects(&mut app, vec![Effect::ConnectService(ConnectorId::new("slack"))]);
        assert!(batch.immediate.is_empty());
        assert_eq!(batch.pending.len(), 1);
        assert_eq!(app.status_text(), Some("Connecting slack..."));

        let mut pending = batch.pending;
        let msg = pending.remove(0).await.expect("join");
        assert_eq!(
            msg,
            Msg::ConnectorAuthCompleted {
                connector: ConnectorId::new("slack"),
                outcome: AuthOutcome::NotConfigured,
            }
        );
    }

    #[test]
    fn search_submission_is_reported_without_navigating() {
        let mut app = test_app(MotionSettings::disabled());
        let batch = run_from_effects(&mut app, vec![Effect::SearchSubmitted("q3 roadmap".into())]);
        assert!(batch.pending.is_empty());
        assert_eq!(app.status_text(), Some("Search is not connected: \"q3 roadmap\""));
        assert_eq!(app.navigation.current(), PanelId::Dashboard);
    }

    #[test]
    fn select_and_quit_update_app() {
        let mut app = test_app(MotionSettings::disabled());
        run_from_effects(&mut app, vec![Effect::SelectPanel(PanelId::Knowledge), Effect::Quit]);
        assert_eq!(app.navigation.current(), PanelId::Knowledge);
        assert!(app.should_quit);
    }

    #[test]
    fn custom_connector_sets_status() {
        let mut app = test_app(MotionSettings::disabled());
        run_from_effects(&mut app, vec![Effect::AddCustomConnector]);
        assert!(app.status.is_some());
    }
}
