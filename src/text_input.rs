use crate::event::{Key, Modifiers};

/// Text content and cursor state for a single editable field.
///
/// The cursor is a character index, not a byte index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole content, placing the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    /// Handle a key press for text editing.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> TextEditResult {
        match key {
            Key::Char(c) if modifiers.none() || (modifiers.shift && !modifiers.ctrl) => {
                self.insert_char(c);
                TextEditResult::Changed
            }

            Key::Backspace if modifiers.none() => {
                if self.delete_back() {
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Delete if modifiers.none() => {
                if self.delete_forward() {
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Left if !modifiers.ctrl => {
                self.cursor = self.cursor.saturating_sub(1);
                TextEditResult::Handled
            }

            Key::Right if !modifiers.ctrl => {
                self.cursor = (self.cursor + 1).min(self.text.chars().count());
                TextEditResult::Handled
            }

            Key::Home if !modifiers.ctrl => {
                self.cursor = 0;
                TextEditResult::Handled
            }

            Key::End if !modifiers.ctrl => {
                self.cursor = self.text.chars().count();
                TextEditResult::Handled
            }

            Key::Enter => TextEditResult::Submitted,

            _ => TextEditResult::Ignored,
        }
    }

    fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns true if text changed.
    fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = char_to_byte_index(&self.text, self.cursor - 1);
        let end = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Delete the character at the cursor. Returns true if text changed.
    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let start = char_to_byte_index(&self.text, self.cursor);
        let end = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }
}

/// Result of handling a text editing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Text was modified.
    Changed,
    /// Enter was pressed.
    Submitted,
    /// Key was handled but text didn't change (e.g., cursor movement).
    Handled,
    /// Key was not handled, should be passed through.
    Ignored,
}

/// Convert character index to byte index in a string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
