// A single policy document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name (or any caller-chosen identifier)
    pub id: String,
    /// Text with newlines removed and surrounding whitespace trimmed
    pub text: String,
    /// Length of `text` in characters, not bytes
    pub length: usize,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: &str) -> Self {
        let text = normalize(raw_text);
        let length = text.chars().count();
        Self {
            id: id.into(),
            text,
            length,
        }
    }

    /// True when nothing is left after normalization.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Drop line breaks (lines of a document are joined without a separator)
/// and trim the ends.
pub fn normalize(raw_text: &str) -> String {
    raw_text.replace('\n', "").trim().to_string()
}
