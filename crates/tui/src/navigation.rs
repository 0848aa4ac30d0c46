//! Active-panel selection.

use contextflow_types::PanelId;
use tracing::debug;

/// Holds the single active panel. Owned by [`crate::app::App`] and only
/// mutated when the user selects a navigation item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationModel {
    active: PanelId,
}

impl NavigationModel {
    pub fn new(initial: PanelId) -> Self {
        Self { active: initial }
    }

    /// Makes `id` the active panel. Returns `false` when `id` was already
    /// active, in which case nothing observable changes.
    pub fn select(&mut self, id: PanelId) -> bool {
        if self.active == id {
            return false;
        }
        debug!(from = %self.active, to = %id, "Panel selected");
        self.active = id;
        true
    }

    pub fn current(&self) -> PanelId {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_dashboard_by_default() {
        assert_eq!(NavigationModel::default().current(), PanelId::Dashboard);
    }

    #[test]
    fn select_reports_whether_selection_changed() {
        let mut navigation = NavigationModel::default();
        assert!(navigation.select(PanelId::Connectors));
        assert_eq!(navigation.current(), PanelId::Connectors);
        assert!(!navigation.select(PanelId::Connectors));
        assert_eq!(navigation.current(), PanelId::Connectors);
    }
}
