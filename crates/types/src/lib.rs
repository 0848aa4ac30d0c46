//! Shared types for the ContextFlow workspace shell.
//!
//! Panel identifiers and the navigation table live in [`panel`], workspace
//! data shapes and the data-source seam in [`workspace`]. The message and
//! effect enums below are the vocabulary components use to talk to the
//! runtime.

pub mod panel;
pub mod workspace;

pub use panel::{IconRef, NAVIGATION_ITEMS, NavigationItem, PanelId, PanelIdError};
pub use workspace::{
    ActivityEntry, ConnectorId, ConnectorOffer, ConnectorStatus, SnapshotError, SummaryTile, WorkspaceFeed,
    WorkspaceSnapshot, parse_hex_rgb,
};

/// Result of a connector authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The external flow granted access.
    Authorized,
    /// The external flow refused; carries the reason reported by the provider.
    Denied(String),
    /// No authorization collaborator is attached.
    NotConfigured,
}

/// Messages delivered to the application by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic frame tick; drives transition progress.
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// A connector authorization task finished.
    ConnectorAuthCompleted { connector: ConnectorId, outcome: AuthOutcome },
}

/// Side effects requested by components and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Make the given panel the active one.
    SelectPanel(PanelId),
    /// Start the authorization flow for a connector offer.
    ConnectService(ConnectorId),
    /// The "Custom API Connector" card was activated.
    AddCustomConnector,
    /// The search input was submitted with the given query.
    SearchSubmitted(String),
    /// Leave the application.
    Quit,
}
