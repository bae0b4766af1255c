//! Result Aggregator
//!
//! Collects captured text and attributes for one session. Consumed by
//! `finalize`, so a session can produce its result only once.

use super::attributes::{AttributeSnapshot, Attributes};
use super::element::TextElement;
use super::ParseResult;

/// Result under construction
#[derive(Debug, Default)]
pub struct ResultAggregator {
    elements: Vec<TextElement>,
    attributes: AttributeSnapshot,
}

impl ResultAggregator {
    pub fn new() -> Self {
        ResultAggregator {
            elements: Vec::with_capacity(16),
            attributes: AttributeSnapshot::new(),
        }
    }

    /// Record the attributes of the element at `position`
    ///
    /// Every element starts exactly once, so a repeated position indicates a
    /// tracker bug; the first value is kept.
    pub fn record_attributes<I>(&mut self, position: String, attributes: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let attributes: Attributes = attributes.into_iter().collect();
        if !self.attributes.insert_once(position.clone(), attributes) {
            log::warn!("attributes for {} already recorded, keeping first", position);
        }
    }

    /// Append one text chunk
    pub fn record_text(&mut self, position: String, text: String) {
        self.elements.push(TextElement { text, position });
    }

    /// Number of text chunks captured so far
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of attribute entries captured so far
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Produce the immutable result
    pub fn finalize(self) -> ParseResult {
        ParseResult {
            elements: self.elements,
            attributes: self.attributes,
        }
    }
}
