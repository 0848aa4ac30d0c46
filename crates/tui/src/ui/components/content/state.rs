use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use crate::ui::components::find_target_index_by_mouse_position;

/// Direction of a card cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

/// Interaction state of the content region.
///
/// The card cursor and hit areas belong to whatever panel is mounted and are
/// reset whenever a new panel mounts. Hit areas are only recorded while the
/// mounted panel is settled, so clicks during a transition land nowhere.
#[derive(Debug, Clone)]
pub struct ContentState {
    pub container_focus: FocusFlag,
    /// Leaf flag for the content region in the focus ring.
    pub content_flag: FocusFlag,
    /// Index of the highlighted card.
    pub cursor: usize,
    /// Card hit areas from the last settled render, indexed like the panel's targets.
    pub card_areas: Vec<Rect>,
    /// Cards per row in the last render.
    pub columns: usize,
    pub last_area: Rect,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            container_focus: FocusFlag::named("contextflow.content"),
            content_flag: FocusFlag::named("contextflow.content.panel"),
            cursor: 0,
            card_areas: Vec::new(),
            columns: 1,
            last_area: Rect::default(),
        }
    }
}

impl ContentState {
    /// Forget everything about the previously mounted panel.
    pub fn reset_for_mount(&mut self) {
        self.cursor = 0;
        self.card_areas.clear();
        self.columns = 1;
    }

    /// Records the card layout of a settled render.
    pub fn set_card_areas(&mut self, areas: Vec<Rect>) {
        self.columns = match areas.first() {
            Some(first) => areas.iter().take_while(|area| area.y == first.y).count().max(1),
            None => 1,
        };
        self.card_areas = areas;
    }

    /// Moves the cursor within `count` cards laid out `self.columns` wide.
    /// Moves that would leave the grid are ignored.
    pub fn move_cursor(&mut self, direction: CursorMove, count: usize) {
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let columns = self.columns.max(1);
        let cursor = self.cursor.min(count - 1);
        self.cursor = match direction {
            CursorMove::Left => cursor.saturating_sub(1),
            CursorMove::Right => (cursor + 1).min(count - 1),
            CursorMove::Up => cursor.checked_sub(columns).unwrap_or(cursor),
            CursorMove::Down if cursor + columns < count => cursor + columns,
            CursorMove::Down => cursor,
        };
    }

    /// Index of the card under the given terminal position.
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        find_target_index_by_mouse_position(&self.last_area, &self.card_areas, x, y)
    }
}

impl HasFocus for ContentState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.content_flag);
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

    fn grid(columns: u16, count: u16) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new((i % columns) * 10, (i / columns) * 5, 10, 5))
            .collect()
    }

    #[test]
    fn columns_follow_first_row() {
        let mut state = ContentState::default();
        state.set_card_areas(grid(3, 4));
        assert_eq!(state.columns, 3);
        state.set_card_areas(Vec::new());
        assert_eq!(state.columns, 1);
    }

    #[test]
    fn cursor_moves_within_grid() {
        let mut state = ContentState::default();
        state.set_card_areas(grid(3, 4));
        state.move_cursor(CursorMove::Left, 4);
        assert_eq!(state.cursor, 0);
        state.move_cursor(CursorMove::Down, 4);
        assert_eq!(state.cursor, 3);
        state.move_cursor(CursorMove::Right, 4);
        assert_eq!(state.cursor, 3);
        state.move_cursor(CursorMove::Up, 4);
        assert_eq!(state.cursor, 0);
        state.move_cursor(CursorMove::Right, 4);
        state.move_cursor(CursorMove::Down, 4);
        assert_eq!(state.cursor, 1, "no card below the middle column");
    }

    #[test]
    fn card_at_uses_recorded_areas() {
        let mut state = ContentState {
            last_area: Rect::new(0, 0, 40, 20),
            ..ContentState::default()
        };
        state.set_card_areas(grid(2, 3));
        assert_eq!(state.card_at(5, 6), Some(2));
        assert_eq!(state.card_at(12, 1), Some(1));
        assert_eq!(state.card_at(39, 19), None);

        state.reset_for_mount();
        assert_eq!(state.card_at(5, 6), None);
        assert_eq!(state.cursor, 0);
    }
}
