//! Top bar: search field, collaborator avatars, notifications and account.
//!
//! The search field's focus state is a `SearchFieldState` that only changes
//! when focus enters or leaves the search leaf. Typing is allowed but nothing
//! is searched; submitting emits `Effect::SearchSubmitted`.

mod state;
mod topbar_component;

pub use state::{SEARCH_PLACEHOLDER, TopbarState};
pub use topbar_component::TopbarComponent;
