//! Component system for the ContextFlow shell.
//!
//! This module defines the Component trait that the sidebar, top bar and
//! content region implement. Components are self-contained UI elements that
//! handle their own events and rendering while integrating with the
//! application through a consistent interface. Their state lives on
//! [`App`] so that the runtime and other components can read it.

use contextflow_types::{Effect, Msg};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;
use crate::ui::utils::rect_contains;

/// A trait representing a UI component with its own behavior.
///
/// Components handle localized events, update state on [`App`], and render
/// themselves into a provided `Rect`, reporting any side effects back to the
/// runtime via `Effect`s.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: Components receive input through `handle_key_events()`
///    and `handle_mouse_events()`
/// 2. **State Updates**: `handle_message()` processes runtime messages
/// 3. **Rendering**: `render()` draws the component into the provided frame area
pub(crate) trait Component {
    /// Handle a runtime message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    ///
    /// # Returns
    ///
    /// Vector of effects that the runtime should process
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Every component sees every mouse event and is
    /// responsible for hit testing against its last rendered areas.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing
    /// and recording the areas used for mouse hit testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hints bar while this component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Splits `area` into the sub-areas the component renders into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}

/// Finds the index of the area containing `(x, y)`.
///
/// `container` is checked first so events outside the component are rejected
/// without scanning `areas`.
pub fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    if !rect_contains(*container, x, y) {
        return None;
    }
    areas.iter().position(|area| rect_contains(*area, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_area_under_pointer() {
        let container = Rect::new(0, 0, 20, 10);
        let areas = [Rect::new(0, 0, 20, 2), Rect::new(0, 2, 20, 2)];
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 3, 3), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 3, 8), None);
        assert_eq!(find_target_index_by_mouse_position(&container, &areas, 30, 1), None);
    }
}
