//! Content region: renders the mounted panel through the transition
//! controller and routes card interaction on settled panels.

mod content_component;
mod state;

pub use content_component::ContentComponent;
pub use state::{ContentState, CursorMove};
