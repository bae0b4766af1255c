//! Tokenizer Module
//!
//! Sessions pull `SaxEvent`s from a `Tokenizer`. Stopping early is simply a
//! matter of not pulling again; the tokenizer is dropped with the session.
//!
//! - `XmlTokenizer`: quick-xml over any `BufRead`
//! - `ReplayTokenizer`: replays a prepared event sequence
//! - `DocumentSource`: bytes, readers, paths and `file:`/`http(s):` URLs
//! - `encoding`: UTF-16 detection and transcoding ahead of quick-xml

pub mod encoding;
pub mod source;
pub mod xml;

pub use encoding::{transcode_utf16, InputEncoding};
pub use source::DocumentSource;
pub use xml::XmlTokenizer;

use crate::error::Result;
use crate::sax::SaxEvent;
use std::collections::VecDeque;

/// SAX-style event producer driven by a session
pub trait Tokenizer {
    /// Pull the next event in document order
    ///
    /// After `SaxEvent::EndDocument` or an error the session stops calling.
    fn next_event(&mut self) -> Result<SaxEvent>;

    /// Byte offset of the most recent event, when known
    fn offset(&self) -> u64 {
        0
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn next_event(&mut self) -> Result<SaxEvent> {
        (**self).next_event()
    }

    fn offset(&self) -> u64 {
        (**self).offset()
    }
}

/// Tokenizer that replays a fixed sequence of events or errors
///
/// Once the sequence is exhausted it reports `EndDocument`.
#[derive(Debug, Default)]
pub struct ReplayTokenizer {
    events: VecDeque<Result<SaxEvent>>,
    replayed: u64,
}

impl ReplayTokenizer {
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Result<SaxEvent>>,
    {
        ReplayTokenizer {
            events: events.into_iter().collect(),
            replayed: 0,
        }
    }

    /// Replay successful events only
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = SaxEvent>,
    {
        Self::new(events.into_iter().map(Ok))
    }

    /// Events not yet pulled
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Tokenizer for ReplayTokenizer {
    fn next_event(&mut self) -> Result<SaxEvent> {
        match self.events.pop_front() {
            Some(event) => {
                self.replayed += 1;
                event
            }
            None => Ok(SaxEvent::EndDocument),
        }
    }

    /// Number of events replayed so far
    fn offset(&self) -> u64 {
        self.replayed
    }
}
