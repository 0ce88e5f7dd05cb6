//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Single-line text buffer with a cursor.
///
/// The cursor is a character index, so editing multi-byte input never splits
/// a code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns `true` if the buffer or cursor changed.
    ///
    /// Enter and Esc are not editing keys and are left to the caller.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        let len = self.buffer.chars().count();
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                true
            },
            KeyInput::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                true
            },
            KeyInput::Delete if self.cursor < len => {
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                true
            },
            KeyInput::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            },
            KeyInput::Right if self.cursor < len => {
                self.cursor += 1;
                true
            },
            KeyInput::Home => {
                self.cursor = 0;
                true
            },
            KeyInput::End => {
                self.cursor = len;
                true
            },
            _ => false,
        }
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_owned();
        self.cursor = self.buffer.chars().count();
    }

    /// Take the contents, leaving the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for c in text.chars() {
            editor.edit(KeyInput::Char(c));
        }
        editor
    }

    #[test]
    fn insert_at_cursor() {
        let mut editor = typed("ac");
        editor.edit(KeyInput::Left);
        editor.edit(KeyInput::Char('b'));
        assert_eq!(editor.buffer(), "abc");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete() {
        let mut editor = typed("abc");
        editor.edit(KeyInput::Backspace);
        assert_eq!(editor.buffer(), "ab");

        editor.edit(KeyInput::Home);
        editor.edit(KeyInput::Delete);
        assert_eq!(editor.buffer(), "b");

        // Nothing before the cursor
        assert!(!editor.edit(KeyInput::Backspace));
    }

    #[test]
    fn multibyte_characters() {
        let mut editor = typed("zoë");
        editor.edit(KeyInput::Backspace);
        assert_eq!(editor.buffer(), "zo");
        editor.edit(KeyInput::Char('é'));
        editor.edit(KeyInput::Home);
        editor.edit(KeyInput::Char('ä'));
        assert_eq!(editor.buffer(), "äzoé");
    }

    #[test]
    fn take_clears() {
        let mut editor = typed("alice");
        assert_eq!(editor.take(), "alice");
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.cursor(), 0);
    }
}
