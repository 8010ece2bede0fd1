use unicode_width::UnicodeWidthStr;

pub const DEFAULT_CHAR_LIMIT: usize = 7;
pub const DEFAULT_PLACEHOLDER: &str = "enter wordcount";

/// Single-line edit buffer holding keystrokes not yet committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
    char_limit: usize,
    placeholder: String,
}

/// Editing keys the buffer understands besides plain characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_LIMIT)
    }
}

impl TextInput {
    pub fn new(char_limit: usize) -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            char_limit,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Display width of the buffer contents
    pub fn width(&self) -> usize {
        self.value().width()
    }

    /// Insert at the cursor. Returns false when the limit is reached.
    pub fn insert(&mut self, c: char) -> bool {
        if c.is_control() || self.chars.len() >= self.char_limit {
            return false;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    pub fn apply(&mut self, key: EditKey) {
        match key {
            EditKey::Backspace => {
                if self.cursor > 0 {
                    self.chars.remove(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            EditKey::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            EditKey::Left => self.cursor = self.cursor.saturating_sub(1),
            EditKey::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            EditKey::Home => self.cursor = 0,
            EditKey::End => self.cursor = self.chars.len(),
        }
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Text before and after the cursor, for rendering
    pub fn split_at_cursor(&self) -> (String, String) {
        (
            self.chars[..self.cursor].iter().collect(),
            self.chars[self.cursor..].iter().collect(),
        )
    }
}
