/// What a single-line input accepts and how it is drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
}

impl InputKind {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            InputKind::Text | InputKind::Email | InputKind::Password => !ch.is_control(),
            InputKind::Number => ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'),
        }
    }

    pub fn is_masked(self) -> bool {
        self == InputKind::Password
    }
}

pub const MASK_CHAR: char = '•';

/// Value and caret of a single-line input. The caret counts chars, not
/// bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditorState {
    kind: InputKind,
    value: String,
    caret: usize,
}

impl EditorState {
    pub fn new(kind: InputKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.chars().count();
        Self { kind, value, caret }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Inserts the accepted characters of `text` at the caret.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let accepted = text
            .chars()
            .filter(|ch| self.kind.accepts(*ch))
            .collect::<String>();
        if accepted.is_empty() {
            return false;
        }
        let byte = byte_index_at_char(&self.value, self.caret);
        self.value.insert_str(byte, &accepted);
        self.caret += accepted.chars().count();
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.remove_char_at(self.caret - 1);
        self.caret -= 1;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        self.remove_char_at(self.caret);
        true
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.len();
    }

    /// Text as drawn, split at the caret.
    pub fn display_parts(&self) -> (String, String) {
        let shown = if self.kind.is_masked() {
            MASK_CHAR.to_string().repeat(self.len())
        } else {
            self.value.clone()
        };
        let split = byte_index_at_char(&shown, self.caret);
        let (before, after) = shown.split_at(split);
        (before.to_string(), after.to_string())
    }

    fn remove_char_at(&mut self, index: usize) {
        let start = byte_index_at_char(&self.value, index);
        let end = byte_index_at_char(&self.value, index + 1);
        self.value.replace_range(start..end, "");
    }
}

fn byte_index_at_char(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_deleting_multibyte_text() {
        let mut state = EditorState::new(InputKind::Text, "");
        assert!(state.insert_text("joão"));
        state.move_left();
        assert!(state.delete_backward());
        assert_eq!(state.value(), "joo");
        assert_eq!(state.caret(), 2);
        assert!(state.insert_text("ã"));
        assert_eq!(state.value(), "joão");
        state.move_home();
        assert!(!state.delete_backward());
        assert!(state.delete_forward());
        assert_eq!(state.value(), "oão");
    }

    #[test]
    fn number_input_filters_characters() {
        let mut state = EditorState::new(InputKind::Number, "");
        assert!(!state.insert_text("abc"));
        assert!(state.insert_text("8a0"));
        assert_eq!(state.value(), "80");
    }

    #[test]
    fn password_is_masked_around_caret() {
        let mut state = EditorState::new(InputKind::Password, "segredo");
        state.move_left();
        let (before, after) = state.display_parts();
        assert_eq!(before, "••••••");
        assert_eq!(after, "•");
    }
}
