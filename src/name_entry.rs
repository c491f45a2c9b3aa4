pub const MAX_NAME_LEN: usize = 16;
pub const ANONYMOUS: &str = "ANONYMOUS";

/// Text typed into the end-of-round name prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append `c` if it's printable and there's room. Returns whether it was kept.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        // CSV quoting handles commas, but a name never needs line breaks
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The name to record: trimmed and uppercased, or `ANONYMOUS`.
    pub fn submit(&self) -> String {
        let name = self.text.trim();
        if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name.to_uppercase()
        }
    }
}
