//! Captured text chunk.

use std::fmt;

/// One character-data chunk found at a matching position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextElement {
    /// Text exactly as the tokenizer reported it
    pub text: String,
    /// Rendered position of the enclosing element, e.g. `/package[1]/metadata[2]`
    pub position: String,
}

impl TextElement {
    pub fn new(text: impl Into<String>, position: impl Into<String>) -> Self {
        TextElement {
            text: text.into(),
            position: position.into(),
        }
    }
}

impl fmt::Display for TextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}", self.position, self.text)
    }
}
