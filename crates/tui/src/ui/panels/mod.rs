//! Panel content shown in the content region.
//!
//! [`PanelRegistry::resolve`] maps every [`PanelId`] to a [`PanelContent`].
//! Content values are rebuilt from the workspace feed on every render and
//! hold no state of their own; interaction state such as the card cursor
//! lives on [`crate::ui::components::content::ContentState`].

use std::sync::Arc;

use contextflow_types::{ConnectorId, Effect, PanelId, WorkspaceFeed};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::ui::theme::Theme;

mod connectors;
mod dashboard;
mod placeholder;

pub use connectors::ConnectorsPanel;
pub use dashboard::DashboardPanel;
pub use placeholder::PlaceholderPanel;

/// Something the user can activate inside a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTarget {
    /// "Connect Service" on an offer card.
    Offer(ConnectorId),
    /// The trailing "Custom API Connector" card.
    CustomConnector,
}

impl ContentTarget {
    pub fn effect(&self) -> Effect {
        match self {
            ContentTarget::Offer(id) => Effect::ConnectService(id.clone()),
            ContentTarget::CustomConnector => Effect::AddCustomConnector,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Dashboard(DashboardPanel),
    Connectors(ConnectorsPanel),
    Placeholder(PlaceholderPanel),
}

impl PanelContent {
    pub fn id(&self) -> PanelId {
        match self {
            PanelContent::Dashboard(_) => PanelId::Dashboard,
            PanelContent::Connectors(_) => PanelId::Connectors,
            PanelContent::Placeholder(panel) => panel.id(),
        }
    }

    /// Activatable targets, in the order their hit areas are returned by
    /// [`PanelContent::render`].
    pub fn targets(&self) -> Vec<ContentTarget> {
        match self {
            PanelContent::Connectors(panel) => panel.targets(),
            PanelContent::Dashboard(_) | PanelContent::Placeholder(_) => Vec::new(),
        }
    }

    /// Draws the panel into `buf` and returns one hit area per target.
    /// `highlighted` is the index of the target under the keyboard cursor;
    /// `reveal` is the enter progress (see `TransitionFrame::reveal`).
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &dyn Theme,
        highlighted: Option<usize>,
        reveal: f32,
    ) -> Vec<Rect> {
        match self {
            PanelContent::Dashboard(panel) => {
                panel.render(area, buf, theme, reveal);
                Vec::new()
            }
            PanelContent::Connectors(panel) => panel.render(area, buf, theme, highlighted),
            PanelContent::Placeholder(panel) => {
                panel.render(area, buf, theme);
                Vec::new()
            }
        }
    }
}

/// Maps panel identifiers to their content.
#[derive(Debug, Clone)]
pub struct PanelRegistry {
    feed: Arc<dyn WorkspaceFeed>,
}

impl PanelRegistry {
    pub fn new(feed: Arc<dyn WorkspaceFeed>) -> Self {
        Self { feed }
    }

    /// Total over [`PanelId`] with no wildcard arm. A new identifier needs
    /// content here before it compiles.
    pub fn resolve(&self, id: PanelId) -> PanelContent {
        match id {
            PanelId::Dashboard => PanelContent::Dashboard(DashboardPanel::from_feed(self.feed.as_ref())),
            PanelId::Connectors => PanelContent::Connectors(ConnectorsPanel::from_feed(self.feed.as_ref())),
            PanelId::Knowledge | PanelId::Insights | PanelId::Settings => {
                PanelContent::Placeholder(PlaceholderPanel::new(id))
            }
        }
    }
}

/// Concatenated symbols of every row, for assertions on rendered text.
#[cfg(test)]
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contextflow_types::WorkspaceSnapshot;

    fn registry() -> PanelRegistry {
        PanelRegistry::new(Arc::new(WorkspaceSnapshot::sample()))
    }

    #[test]
    fn resolve_covers_every_panel() {
        let registry = registry();
        for id in PanelId::ALL {
            assert_eq!(registry.resolve(id).id(), id);
        }
    }

    #[test]
    fn resolve_maps_kinds() {
        let registry = registry();
        assert!(matches!(registry.resolve(PanelId::Dashboard), PanelContent::Dashboard(_)));
        assert!(matches!(registry.resolve(PanelId::Connectors), PanelContent::Connectors(_)));
        for id in [PanelId::Knowledge, PanelId::Insights, PanelId::Settings] {
            match registry.resolve(id) {
                PanelContent::Placeholder(panel) => assert_eq!(panel.id(), id),
                other => panic!("expected placeholder for {id}, got {other:?}"),
            }
        }
    }

    #[test]
    fn only_connectors_have_targets() {
        let registry = registry();
        assert!(registry.resolve(PanelId::Dashboard).targets().is_empty());
        assert!(registry.resolve(PanelId::Settings).targets().is_empty());
        let targets = registry.resolve(PanelId::Connectors).targets();
        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0].effect(), Effect::ConnectService(ConnectorId::new("slack")));
        assert_eq!(targets[3].effect(), Effect::AddCustomConnector);
    }
}
