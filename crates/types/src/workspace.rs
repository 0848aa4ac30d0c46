//! Workspace data shown by the dashboard and connectors panels.
//!
//! The shell never computes these values. They arrive through a
//! [`WorkspaceFeed`]; [`WorkspaceSnapshot`] is the built-in feed backed by a
//! static sample table or a JSON file.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::panel::IconRef;

/// Identifier of a connector offering (`"slack"`, `"notion"`, ...). Keys the
/// authorization collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub String);

impl ConnectorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the three headline tiles on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTile {
    pub label: String,
    pub value: String,
    pub sub: String,
    pub icon: IconRef,
    /// Accent color as `#RRGGBB`.
    pub accent: String,
}

/// A row in the activity feed. Feeds are supplied newest first and rendered
/// in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub title: String,
    pub relative_time: String,
    pub source_label: String,
    pub actor_name: String,
}

impl ActivityEntry {
    /// First character of the source label, used as the entry badge.
    pub fn source_initial(&self) -> char {
        self.source_label.chars().next().unwrap_or('?')
    }
}

/// Entry in the dashboard's connector status grid. `active` only selects
/// styling; it does not gate interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    pub name: String,
    pub status: String,
    pub active: bool,
    pub icon: IconRef,
}

/// A connector offer card on the connectors panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorOffer {
    pub id: ConnectorId,
    pub name: String,
    pub description: String,
    pub icon: IconRef,
    /// Accent color as `#RRGGBB`.
    pub accent: String,
}

/// Source of the values rendered by the workspace panels.
pub trait WorkspaceFeed: Send + Sync + fmt::Debug {
    fn summary_tiles(&self) -> [SummaryTile; 3];
    /// Activity entries, newest first.
    fn activity(&self) -> Vec<ActivityEntry>;
    fn connector_statuses(&self) -> Vec<ConnectorStatus>;
    fn connector_offers(&self) -> Vec<ConnectorOffer>;
}

/// Errors raised while loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read workspace snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid workspace snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid accent color '{value}' for {owner}; expected #RRGGBB")]
    InvalidAccent { owner: String, value: String },
    #[error("duplicate connector offer id '{0}'")]
    DuplicateOffer(ConnectorId),
}

/// A complete, immutable set of workspace data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub tiles: [SummaryTile; 3],
    pub activity: Vec<ActivityEntry>,
    pub connectors: Vec<ConnectorStatus>,
    pub offers: Vec<ConnectorOffer>,
}

impl Default for WorkspaceSnapshot {
    fn default() -> Self {
        Self::sample()
    }
}

impl WorkspaceSnapshot {
    /// Placeholder values shown until a real data source is attached.
    pub fn sample() -> Self {
        Self {
            tiles: [
                tile("Total Index", "14,281", "+241 today", IconRef::Database, "#818CF8"),
                tile("Sync Status", "Optimal", "99.9% uptime", IconRef::Zap, "#FBBF24"),
                tile("Active Query", "124", "Last 10 mins", IconRef::Clock, "#34D399"),
            ],
            activity: vec![
                activity("Project X Roadmap", "2m ago", "Notion", "Sarah"),
                activity("Marketing Feedback", "14m ago", "Slack", "Alex"),
                activity("Financial Report v2", "1h ago", "Google Drive", "System"),
            ],
            connectors: vec![
                status("Slack", "Active", true, IconRef::Chat),
                status("Notion", "Active", true, IconRef::Database),
                status("G-Drive", "Paused", false, IconRef::Cloud),
                status("Custom", "Action", false, IconRef::Plus),
            ],
            offers: vec![
                offer(
                    "slack",
                    "Slack Workspace",
                    "Sync channels, threads and messages for team context.",
                    IconRef::Chat,
                    "#4A154B",
                ),
                offer(
                    "notion",
                    "Notion Workspace",
                    "Index databases, pages and comments.",
                    IconRef::Database,
                    "#000000",
                ),
                offer(
                    "drive",
                    "Google Workspace",
                    "Analyze docs, sheets and presentations.",
                    IconRef::Cloud,
                    "#4285F4",
                ),
            ],
        }
    }

    /// Parse and validate a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Read, parse and validate a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks invariants serde cannot express: accent colors parse and offer
    /// ids are unique.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for tile in &self.tiles {
            check_accent(&tile.label, &tile.accent)?;
        }
        let mut seen = HashSet::new();
        for offer in &self.offers {
            check_accent(&offer.name, &offer.accent)?;
            if !seen.insert(offer.id.clone()) {
                return Err(SnapshotError::DuplicateOffer(offer.id.clone()));
            }
        }
        Ok(())
    }
}

impl WorkspaceFeed for WorkspaceSnapshot {
    fn summary_tiles(&self) -> [SummaryTile; 3] {
        self.tiles.clone()
    }

    fn activity(&self) -> Vec<ActivityEntry> {
        self.activity.clone()
    }

    fn connector_statuses(&self) -> Vec<ConnectorStatus> {
        self.connectors.clone()
    }

    fn connector_offers(&self) -> Vec<ConnectorOffer> {
        self.offers.clone()
    }
}

/// Parses `#RRGGBB` into its channels.
pub fn parse_hex_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn check_accent(owner: &str, value: &str) -> Result<(), SnapshotError> {
    match parse_hex_rgb(value) {
        Some(_) => Ok(()),
        None => Err(SnapshotError::InvalidAccent {
            owner: owner.to_string(),
            value: value.to_string(),
        }),
    }
}

fn tile(label: &str, value: &str, sub: &str, icon: IconRef, accent: &str) -> SummaryTile {
    SummaryTile {
        label: label.into(),
        value: value.into(),
        sub: sub.into(),
        icon,
        accent: accent.into(),
    }
}

fn activity(title: &str, relative_time: &str, source_label: &str, actor_name: &str) -> ActivityEntry {
    ActivityEntry {
        title: title.into(),
        relative_time: relative_time.into(),
        source_label: source_label.into(),
        actor_name: actor_name.into(),
    }
}

fn status(name: &str, status: &str, active: bool, icon: IconRef) -> ConnectorStatus {
    ConnectorStatus {
        name: name.into(),
        status: status.into(),
        active,
        icon,
    }
}

fn offer(id: &str, name: &str, description: &str, icon: IconRef, accent: &str) -> ConnectorOffer {
    ConnectorOffer {
        id: ConnectorId::new(id),
        name: name.into(),
        description: description.into(),
        icon,
        accent: accent.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_has_expected_shape() {
        let snapshot = WorkspaceSnapshot::sample();
        assert_eq!(snapshot.tiles.len(), 3);
        assert_eq!(snapshot.activity.len(), 3);
        assert_eq!(snapshot.connectors.len(), 4);
        assert_eq!(snapshot.offers.len(), 3);
        snapshot.validate().expect("sample data is valid");
    }

    #[test]
    fn activity_keeps_source_order() {
        let titles: Vec<String> = WorkspaceSnapshot::sample().activity().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Project X Roadmap", "Marketing Feedback", "Financial Report v2"]);
    }

    #[test]
    fn parse_hex_rgb_accepts_only_six_digit_hex() {
        assert_eq!(parse_hex_rgb("#4285F4"), Some((0x42, 0x85, 0xF4)));
        assert_eq!(parse_hex_rgb("4285F4"), None);
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("#GG0000"), None);
    }

    #[test]
    fn from_json_str_rejects_bad_accent() {
        let mut snapshot = WorkspaceSnapshot::sample();
        snapshot.offers[0].accent = "purple".into();
        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let error = WorkspaceSnapshot::from_json_str(&json).expect_err("accent must be hex");
        assert!(matches!(error, SnapshotError::InvalidAccent { ref value, .. } if value == "purple"));
    }

    #[test]
    fn from_json_str_rejects_duplicate_offer_ids() {
        let mut snapshot = WorkspaceSnapshot::sample();
        snapshot.offers[1].id = ConnectorId::new("slack");
        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let error = WorkspaceSnapshot::from_json_str(&json).expect_err("ids must be unique");
        assert!(matches!(error, SnapshotError::DuplicateOffer(id) if id.as_str() == "slack"));
    }

    #[test]
    fn from_json_str_requires_exactly_three_tiles() {
        let mut value = serde_json::to_value(WorkspaceSnapshot::sample()).expect("to value");
        value["tiles"].as_array_mut().expect("tiles array").pop();
        let error = WorkspaceSnapshot::from_json_str(&value.to_string()).expect_err("two tiles is invalid");
        assert!(matches!(error, SnapshotError::Parse(_)));
    }

    #[test]
    fn from_path_loads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = serde_json::to_string_pretty(&WorkspaceSnapshot::sample()).expect("serialize");
        file.write_all(json.as_bytes()).expect("write snapshot");

        let loaded = WorkspaceSnapshot::from_path(file.path()).expect("load snapshot");
        assert_eq!(loaded, WorkspaceSnapshot::sample());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let error = WorkspaceSnapshot::from_path(Path::new("/definitely/not/here.json")).expect_err("missing");
        assert!(matches!(error, SnapshotError::Io { .. }));
    }
}
