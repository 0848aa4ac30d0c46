//! Navigation sidebar.
//!
//! A vertical list of the five navigation items plus the brand header and
//! plan card. It supports:
//! - rat-focus integration via a `FocusFlag` per item
//! - Keyboard navigation (Up/Down/Enter)
//! - Left click selection
//!
//! The sidebar never mutates the navigation model itself; it emits
//! `Effect::SelectPanel` and highlights whatever the model reports as active.

mod sidebar_component;
mod state;

pub use sidebar_component::SidebarComponent;
pub use state::SidebarState;
