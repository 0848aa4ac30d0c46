//! UI rendering module for the TUI application.
//!
//! This module provides the user interface: the shell layout, its
//! components, the panel content, theming and the runtime loop.

pub mod components;
pub mod main_component;
pub mod panels;
pub mod runtime;
pub mod theme;
pub mod utils;
