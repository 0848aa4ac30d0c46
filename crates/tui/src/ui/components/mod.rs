//! UI components: sidebar, top bar and content region.

pub mod common;
pub mod component;
pub mod content;
pub mod sidebar;
pub mod topbar;

pub use component::*;
pub use content::ContentComponent;
pub use sidebar::SidebarComponent;
pub use topbar::TopbarComponent;
