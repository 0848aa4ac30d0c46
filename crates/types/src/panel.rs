//! Panel identifiers and the static navigation table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one selectable content region of the main view.
///
/// The set is closed and fixed for the lifetime of the process. Every
/// consumer that maps a `PanelId` to something else is expected to `match`
/// exhaustively so that adding a member is a compile error until every
/// mapping handles it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    #[default]
    Dashboard,
    Connectors,
    Knowledge,
    Insights,
    Settings,
}

impl PanelId {
    /// Every panel, in sidebar order.
    pub const ALL: [PanelId; 5] = [
        PanelId::Dashboard,
        PanelId::Connectors,
        PanelId::Knowledge,
        PanelId::Insights,
        PanelId::Settings,
    ];

    /// Canonical lowercase identifier (`"dashboard"`, `"connectors"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PanelId::Dashboard => "dashboard",
            PanelId::Connectors => "connectors",
            PanelId::Knowledge => "knowledge",
            PanelId::Insights => "insights",
            PanelId::Settings => "settings",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a known panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelIdError {
    #[error("unknown panel id '{0}'; expected one of dashboard, connectors, knowledge, insights, settings")]
    Unknown(String),
}

impl FromStr for PanelId {
    type Err = PanelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim().to_ascii_lowercase();
        PanelId::ALL
            .into_iter()
            .find(|id| id.as_str() == candidate)
            .ok_or_else(|| PanelIdError::Unknown(s.to_string()))
    }
}

/// Symbolic icon reference. Renderers decide how an icon is drawn; the
/// terminal renderer maps each to a single-column glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    LayoutDashboard,
    Unlink,
    BookOpen,
    BrainCircuit,
    Settings,
    Search,
    Bell,
    Plus,
    Chat,
    Database,
    Cloud,
    ChevronRight,
    Zap,
    Clock,
    User,
    Command,
}

impl IconRef {
    pub const fn glyph(&self) -> &'static str {
        match self {
            IconRef::LayoutDashboard => "▦",
            IconRef::Unlink => "⇄",
            IconRef::BookOpen => "¶",
            IconRef::BrainCircuit => "✦",
            IconRef::Settings => "⚙",
            IconRef::Search => "⌕",
            IconRef::Bell => "⍾",
            IconRef::Plus => "+",
            IconRef::Chat => "#",
            IconRef::Database => "≣",
            IconRef::Cloud => "☁",
            IconRef::ChevronRight => "›",
            IconRef::Zap => "ϟ",
            IconRef::Clock => "◷",
            IconRef::User => "◉",
            IconRef::Command => "⌘",
        }
    }
}

/// A selectable entry in the sidebar. Built once at startup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationItem {
    pub id: PanelId,
    pub label: &'static str,
    pub icon: IconRef,
}

/// The static navigation table, in display order.
pub const NAVIGATION_ITEMS: [NavigationItem; 5] = [
    NavigationItem {
        id: PanelId::Dashboard,
        label: "Dashboard",
        icon: IconRef::LayoutDashboard,
    },
    NavigationItem {
        id: PanelId::Connectors,
        label: "Connectors",
        icon: IconRef::Unlink,
    },
    NavigationItem {
        id: PanelId::Knowledge,
        label: "Knowledge Base",
        icon: IconRef::BookOpen,
    },
    NavigationItem {
        id: PanelId::Insights,
        label: "AI Insights",
        icon: IconRef::BrainCircuit,
    },
    NavigationItem {
        id: PanelId::Settings,
        label: "Settings",
        icon: IconRef::Settings,
    },
];
