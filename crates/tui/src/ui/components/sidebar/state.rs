use contextflow_types::{NAVIGATION_ITEMS, NavigationItem, PanelId};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// State for the navigation sidebar.
///
/// Owns the static navigation table and rat-focus flags for both the
/// container and each item. Which item is *active* is not stored here; it is
/// read from [`crate::navigation::NavigationModel`] at render time so the two
/// can never disagree.
#[derive(Debug, Clone)]
pub struct SidebarState {
    /// Items displayed in the sidebar, in display order.
    pub items: Vec<NavigationItem>,
    /// Focus flag for the container in the global focus tree.
    pub container_focus: FocusFlag,
    /// Focus flags for each item; kept in sync with `items` length.
    pub item_focus_flags: Vec<FocusFlag>,
    /// Last rendered area of the sidebar; used for mouse hit testing.
    pub last_area: Rect,
    /// Last computed per-item row areas for hit testing.
    pub per_item_areas: Vec<Rect>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new(NAVIGATION_ITEMS.to_vec())
    }
}

impl SidebarState {
    pub fn new(items: Vec<NavigationItem>) -> Self {
        let item_focus_flags = (0..items.len())
            .map(|i| FocusFlag::new().with_name(&format!("contextflow.sidebar.item.{i}")))
            .collect();
        Self {
            items,
            container_focus: FocusFlag::named("contextflow.sidebar"),
            item_focus_flags,
            last_area: Rect::default(),
            per_item_areas: Vec::new(),
        }
    }

    /// Index of the item that currently holds keyboard focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.item_focus_flags.iter().position(|flag| flag.get())
    }

    pub fn get_focused_item(&self) -> Option<NavigationItem> {
        self.focused_index().and_then(|idx| self.items.get(idx).copied())
    }

    /// Flag of the item after (or before) the focused one, wrapping at the ends.
    pub fn cycle_focus(&self, forward: bool) -> Option<FocusFlag> {
        let len = self.item_focus_flags.len();
        let idx = self.focused_index()?;
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.item_focus_flags.get(next).cloned()
    }

    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Focus flag of the item for `id`.
    pub fn flag_for(&self, id: PanelId) -> Option<&FocusFlag> {
        self.index_of(id).and_then(|idx| self.item_focus_flags.get(idx))
    }
}

impl HasFocus for SidebarState {
    /// Builds a focus subtree consisting of each item as a leaf under the
    /// container focus flag.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for flag in &self.item_focus_flags {
            builder.leaf_widget(flag);
        }
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
    fn cycle_focus_wraps_in_both_directions() {
        let state = SidebarState::default();
        state.item_focus_flags[0].set(true);
        let prev = state.cycle_focus(false).expect("previous flag");
        assert_eq!(prev.widget_id(), state.item_focus_flags[4].widget_id());

        state.item_focus_flags[0].set(false);
        state.item_focus_flags[4].set(true);
        let next = state.cycle_focus(true).expect("next flag");
        assert_eq!(next.widget_id(), state.item_focus_flags[0].widget_id());
    }

    #[test]
    fn no_focused_item_means_no_cycle() {
        let state = SidebarState::default();
        assert!(state.cycle_focus(true).is_none());
        assert!(state.get_focused_item().is_none());
    }

    #[test]
    fn flag_lookup_by_panel() {
        let state = SidebarState::default();
        let flag = state.flag_for(PanelId::Insights).expect("insights flag");
        assert_eq!(flag.widget_id(), state.item_focus_flags[3].widget_id());
    }
}
