//! Numeric text field used by quantity prompts.

/// Longest accepted entry, keeps values well inside `i64`.
const MAX_DIGITS: usize = 9;

/// Editable integer field.
///
/// Holds the raw text so an empty or partially typed field can be rendered
/// as-is; [`NumberInput::value`] parses on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberInput {
    text: String,
    signed: bool,
}

impl NumberInput {
    /// Empty field accepting digits only.
    pub fn unsigned() -> Self {
        Self::default()
    }

    /// Empty field that also accepts a leading minus sign.
    pub fn signed() -> Self {
        Self {
            text: String::new(),
            signed: true,
        }
    }

    /// Unsigned field pre-filled with `value`; a negative value becomes 0.
    pub fn with_value(value: i64) -> Self {
        Self {
            text: value.max(0).to_string(),
            signed: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply one typed character. Returns false if it was rejected.
    pub fn push(&mut self, ch: char) -> bool {
        let digits = self.text.trim_start_matches('-').len();
        if ch.is_ascii_digit() && digits < MAX_DIGITS {
            self.text.push(ch);
            return true;
        }
        if ch == '-' && self.signed && self.text.is_empty() {
            self.text.push(ch);
            return true;
        }
        false
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn value(&self) -> Option<i64> {
        self.text.parse().ok()
    }

    /// Parsed value if it lies in `min..=max`.
    pub fn within(&self, min: i64, max: i64) -> Option<i64> {
        self.value().filter(|v| (min..=max).contains(v))
    }
}
