//! xmlsift - Streaming XML extraction by indexed path patterns
//!
//! A pattern such as `/package/metadata[1]/language` is matched against the
//! element path of every event while the document streams past. Text is
//! captured where the path matches exactly, attributes along every element
//! that agrees with the pattern so far, and the session stops as soon as
//! document order rules out any further match.
//!
//! Strategies:
//! A: One-shot callback (XmlQuery::get_elements)
//! B: Blocking call (XmlQuery::elements, query)
//! C: Cancellable single-value stream (XmlQuery::elements_stream)
//! D: Parallel patterns over one document (query_parallel, query_map)
//! E: Custom tokenizers (ParseSession::run)

pub mod config;
pub mod error;
pub mod matcher;
pub mod path;
pub mod query;
pub mod reader;
pub mod result;
pub mod sax;
pub mod strategy;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use path::{PathPattern, PathSegment, PatternCache, ResolvedSegment, TraversalPosition};
pub use query::XmlQuery;
pub use reader::{DocumentSource, ReplayTokenizer, Tokenizer, XmlTokenizer};
pub use result::{AttributeSnapshot, Attributes, ParseResult, TextElement};
pub use sax::SaxEvent;
pub use strategy::{query_map, query_parallel, CancelToken, ParseSession, ResultStream};

// ============================================================================
// Convenience Entry Points
// ============================================================================

/// Match a textual path expression against an in-memory document
pub fn query(document: &[u8], expr: &str) -> Result<ParseResult> {
    let pattern: PathPattern = expr.parse()?;
    query_pattern(document, &pattern)
}

/// Match a pattern against an in-memory document with the default config
pub fn query_pattern(document: &[u8], pattern: &PathPattern) -> Result<ParseResult> {
    strategy::execute(
        DocumentSource::bytes(document),
        pattern,
        &ParserConfig::default(),
        None,
    )
}
