use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::debug;

use crate::ui::components::common::TextInputState;

/// Width of the search box in columns, unfocused and focused.
pub const SEARCH_WIDTH: u16 = 40;
pub const SEARCH_WIDTH_FOCUSED: u16 = 50;

pub const SEARCH_PLACEHOLDER: &str = "Instant find across all sources...";

/// Focus state of the search input.
///
/// Only the focus and blur events mutate it. It has no bearing on navigation
/// or panel content; the top bar reads it to pick the search box width,
/// border color and icon tint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFieldState {
    focused: bool,
}

impl SearchFieldState {
    pub fn on_focus(&mut self) {
        debug!("Search field focused");
        self.focused = true;
    }

    pub fn on_blur(&mut self) {
        debug!("Search field blurred");
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current width of the search box.
    pub fn width(&self) -> u16 {
        if self.focused { SEARCH_WIDTH_FOCUSED } else { SEARCH_WIDTH }
    }
}

/// State for the top bar: the search field and its typed text.
#[derive(Debug, Clone)]
pub struct TopbarState {
    pub search: SearchFieldState,
    pub input: TextInputState,
    pub container_focus: FocusFlag,
    /// Leaf flag for the search input.
    pub search_flag: FocusFlag,
    pub last_area: Rect,
    /// Last rendered search box area for mouse focus.
    pub search_area: Rect,
}

impl Default for TopbarState {
    fn default() -> Self {
        Self {
            search: SearchFieldState::default(),
            input: TextInputState::new(),
            container_focus: FocusFlag::named("contextflow.topbar"),
            search_flag: FocusFlag::named("contextflow.topbar.search"),
            last_area: Rect::default(),
            search_area: Rect::default(),
        }
    }
}

impl TopbarState {
    /// Applies the focus event implied by the search leaf's focus flag.
    /// Returns `true` when the search field's state changed.
    pub fn sync_search_focus(&mut self) -> bool {
        match (self.search_flag.get(), self.search.is_focused()) {
            (true, false) => {
                self.search.on_focus();
                true
            }
            (false, true) => {
                self.search.on_blur();
                true
            }
            _ => false,
        }
    }
}

impl HasFocus for TopbarState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.search_flag);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_then_blur_leaves_field_unfocused() {
        let mut search = SearchFieldState::default();
        assert!(!search.is_focused());
        search.on_focus();
        assert!(search.is_focused());
        assert_eq!(search.width(), SEARCH_WIDTH_FOCUSED);
        search.on_blur();
        assert!(!search.is_focused());
        assert_eq!(search.width(), SEARCH_WIDTH);
    }

    #[test]
    fn sync_follows_the_leaf_flag() {
        let mut topbar = TopbarState::default();
        assert!(!topbar.sync_search_focus());

        topbar.search_flag.set(true);
        assert!(topbar.sync_search_focus());
        assert!(topbar.search.is_focused());
        assert!(!topbar.sync_search_focus());

        topbar.search_flag.set(false);
        assert!(topbar.sync_search_focus());
        assert!(!topbar.search.is_focused());
    }

    #[test]
    fn typed_text_survives_blur() {
        let mut topbar = TopbarState::default();
        topbar.search_flag.set(true);
        topbar.sync_search_focus();
        topbar.input.insert_char('q');
        topbar.search_flag.set(false);
        topbar.sync_search_focus();
        assert_eq!(topbar.input.input(), "q");
    }
}
