//! Query Results
//!
//! ```text
//! ParseResult
//! ├── elements: Vec<TextElement>      # document order, one per text chunk
//! └── attributes: AttributeSnapshot   # rendered position -> attributes
//! ```

pub mod attributes;
pub mod collector;
pub mod element;

pub use attributes::{AttributeSnapshot, Attributes};
pub use collector::ResultAggregator;
pub use element::TextElement;

/// Outcome of a successful query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Captured text chunks in document order
    pub elements: Vec<TextElement>,
    /// Attributes of every prefix-compatible element
    pub attributes: AttributeSnapshot,
}

impl ParseResult {
    /// Text of every captured chunk, in order
    pub fn texts(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.text.as_str()).collect()
    }

    /// Captured chunks for one rendered position
    pub fn elements_at<'a>(&'a self, position: &'a str) -> impl Iterator<Item = &'a TextElement> {
        self.elements.iter().filter(move |e| e.position == position)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.attributes.is_empty()
    }
}
