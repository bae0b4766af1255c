//! SAX Event Types
//!
//! Owned events a tokenizer hands to a session, in document order.

/// A SAX parsing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    /// Tokenizer is about to report the first node
    StartDocument,

    /// Start of an element (empty elements are reported as start + end)
    StartElement {
        /// Qualified name, prefix included
        name: String,
        /// Attributes as (name, unescaped value) pairs in document order
        attributes: Vec<(String, String)>,
    },

    /// End of an element
    EndElement { name: String },

    /// One chunk of character data (text, resolved reference, or CDATA)
    Characters(String),

    /// Input exhausted
    EndDocument,
}

impl SaxEvent {
    /// Create a start element event without attributes
    pub fn start(name: impl Into<String>) -> Self {
        SaxEvent::StartElement {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        SaxEvent::EndElement { name: name.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        SaxEvent::Characters(text.into())
    }

    /// Check if this is a start element event
    #[inline]
    pub fn is_start_element(&self) -> bool {
        matches!(self, SaxEvent::StartElement { .. })
    }

    /// Check if this is an end element event
    #[inline]
    pub fn is_end_element(&self) -> bool {
        matches!(self, SaxEvent::EndElement { .. })
    }

    /// Get the element name if this is a start or end element
    pub fn element_name(&self) -> Option<&str> {
        match self {
            SaxEvent::StartElement { name, .. } | SaxEvent::EndElement { name } => Some(name),
            _ => None,
        }
    }
}
