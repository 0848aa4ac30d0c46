//! UI utilities and helper functions for the TUI application.

use ratatui::layout::{Position, Rect};

/// Whether the terminal cell at `(x, y)` lies inside `area`.
///
/// Empty rects never contain anything, which lets components keep
/// zero-sized placeholder areas in their hit lists.
pub fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    !area.is_empty() && area.contains(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_exclusive_of_far_edges() {
        let area = Rect::new(2, 2, 4, 3);
        assert!(rect_contains(area, 2, 2));
        assert!(rect_contains(area, 5, 4));
        assert!(!rect_contains(area, 6, 4));
        assert!(!rect_contains(area, 5, 5));
        assert!(!rect_contains(Rect::default(), 0, 0));
    }
}
