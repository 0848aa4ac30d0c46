//! Reusable UTF-8 safe text input state with cursor management.
//!
//! Backs the top bar's search field. Cursor positions are byte indices that
//! always sit on a character boundary.

use unicode_width::UnicodeWidthChar;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    // ----- Getters -----
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
    }

    // ----- Setters -----
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ----- Editing primitives (UTF-8 safe) -----

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            let end = self.cursor + next.len_utf8();
            self.input.drain(self.cursor..end);
        }
    }

    /// Returns the slice of the input that fits in `width` columns while
    /// keeping the cursor visible, plus the cursor column within that slice.
    pub fn visible_window(&self, width: usize) -> (&str, usize) {
        if width == 0 {
            return ("", 0);
        }
        // Walk back from the cursor until the window is full.
        let mut start = self.cursor;
        let mut used = 0;
        for (index, ch) in self.input[..self.cursor].char_indices().rev() {
            let w = ch.width().unwrap_or(0);
            if used + w >= width {
                break;
            }
            used += w;
            start = index;
        }
        let cursor_column = used;

        let mut end = self.cursor;
        for (offset, ch) in self.input[self.cursor..].char_indices() {
            let w = ch.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            end = self.cursor + offset + ch.len_utf8();
        }
        (&self.input[start..end], cursor_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("h🙂llo"); // emoji is 4 bytes
        st.move_home();
        st.move_right(); // between h and 🙂
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right(); // step over 🙂
        st.backspace(); // delete 🙂
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn delete_and_clear() {
        let mut st = TextInputState::new();
        st.set_input("notion");
        st.move_home();
        st.delete();
        assert_eq!(st.input(), "otion");
        st.move_end();
        st.delete();
        assert_eq!(st.input(), "otion");
        st.clear();
        assert!(st.is_empty());
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn visible_window_tracks_cursor() {
        let mut st = TextInputState::new();
        st.set_input("abcdefghij");
        let (text, column) = st.visible_window(5);
        assert_eq!(text, "ghij");
        assert_eq!(column, 4);

        st.move_home();
        let (text, column) = st.visible_window(5);
        assert_eq!(text, "abcde");
        assert_eq!(column, 0);
    }
}
