//! Query Builder
//!
//! `XmlQuery` pairs a document source with a pattern built step by step and
//! runs it through one of the delivery strategies.
//!
//! ```no_run
//! use xmlsift::XmlQuery;
//!
//! let result = XmlQuery::from_path("book/package.opf")
//!     .child("package")
//!     .child("metadata")
//!     .index(0)
//!     .child("language")
//!     .elements()?;
//! for element in &result.elements {
//!     println!("{} = {}", element.position, element.text);
//! }
//! # Ok::<(), xmlsift::Error>(())
//! ```

use crate::config::ParserConfig;
use crate::error::Result;
use crate::path::PathPattern;
use crate::reader::DocumentSource;
use crate::result::ParseResult;
use crate::strategy::{deliver, execute, CancelToken, ResultStream};
use std::io::Read;
use std::path::PathBuf;
use url::Url;

/// A document plus the pattern to match against it
#[derive(Debug)]
pub struct XmlQuery {
    source: DocumentSource,
    pattern: PathPattern,
    config: ParserConfig,
}

impl XmlQuery {
    pub fn new(source: impl Into<DocumentSource>) -> Self {
        XmlQuery {
            source: source.into(),
            pattern: PathPattern::new(),
            config: ParserConfig::default(),
        }
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(DocumentSource::bytes(data))
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self::new(DocumentSource::reader(reader))
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(DocumentSource::path(path))
    }

    pub fn from_url(url: Url) -> Self {
        Self::new(DocumentSource::url(url))
    }

    /// Descend into child elements named `name`
    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.pattern = self.pattern.append(name);
        self
    }

    /// Pin the last step to its zero-based sibling `index`
    pub fn index(mut self, index: usize) -> Self {
        self.pattern = self.pattern.with_index(index);
        self
    }

    /// Replace the whole pattern
    pub fn pattern(mut self, pattern: PathPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The pattern built so far
    pub fn path(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Run the query and invoke `callback` exactly once with the outcome
    pub fn get_elements<F>(self, callback: F)
    where
        F: FnOnce(Result<ParseResult>),
    {
        deliver(self.source, &self.pattern, &self.config, None, callback)
    }

    /// Like `get_elements`, stopping early when `token` is cancelled
    pub fn get_elements_with_cancel<F>(self, token: &CancelToken, callback: F)
    where
        F: FnOnce(Result<ParseResult>),
    {
        deliver(
            self.source,
            &self.pattern,
            &self.config,
            Some(token.clone()),
            callback,
        )
    }

    /// Run the query on the calling thread
    pub fn elements(self) -> Result<ParseResult> {
        execute(self.source, &self.pattern, &self.config, None)
    }

    /// Single-value stream; the session starts on first poll
    pub fn elements_stream(self) -> ResultStream {
        let XmlQuery {
            source,
            pattern,
            config,
        } = self;
        ResultStream::new(move |token| execute(source, &pattern, &config, Some(token)))
    }
}
