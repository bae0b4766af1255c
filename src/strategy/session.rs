//! Parse Session
//!
//! One session per query. It owns the tracker and aggregator, pulls events
//! from a tokenizer and stops at document end, at the first error, on
//! cancellation, or as soon as the position is beyond the pattern.

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::matcher::{is_exact_match, MatchDecision};
use crate::path::PathPattern;
use crate::reader::encoding::normalize_reader;
use crate::reader::{DocumentSource, Tokenizer, XmlTokenizer};
use crate::result::{ParseResult, ResultAggregator};
use crate::sax::{SaxEvent, TraversalTracker};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a session and its owner
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation; the session stops before its next event
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// What the session should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finish,
}

/// Streaming match state for one query
pub struct ParseSession<'p> {
    pattern: &'p PathPattern,
    tracker: TraversalTracker,
    aggregator: ResultAggregator,
    early_termination: bool,
    skip_whitespace_only: bool,
    root_seen: bool,
    cancel: Option<CancelToken>,
    events: u64,
}

impl<'p> ParseSession<'p> {
    pub fn new(pattern: &'p PathPattern, config: &ParserConfig) -> Self {
        ParseSession {
            pattern,
            tracker: TraversalTracker::new(),
            aggregator: ResultAggregator::new(),
            early_termination: config.early_termination,
            skip_whitespace_only: config.skip_whitespace_only,
            root_seen: false,
            cancel: None,
            events: 0,
        }
    }

    /// Attach a cancellation token checked before every event
    pub fn with_cancel(mut self, token: Option<CancelToken>) -> Self {
        self.cancel = token;
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Drive `tokenizer` until the session finishes
    ///
    /// Returns `Error::Cancelled` if the token fired first; any event or
    /// error the tokenizer hands out after that point is dropped unapplied.
    pub fn run<T: Tokenizer + ?Sized>(mut self, tokenizer: &mut T) -> Result<ParseResult> {
        log::debug!("session start: pattern {}", self.pattern);

        loop {
            if self.is_cancelled() {
                log::debug!("session cancelled after {} events", self.events);
                return Err(Error::Cancelled);
            }

            let next = tokenizer.next_event();
            if self.is_cancelled() {
                log::debug!("session cancelled after {} events", self.events);
                return Err(Error::Cancelled);
            }
            let event = next.map_err(|e| {
                log::debug!("session failed after {} events: {}", self.events, e);
                e
            })?;

            if self.handle(event, tokenizer.offset())? == Step::Finish {
                break;
            }
        }

        log::debug!(
            "session complete: {} text chunks, {} attribute entries, {} events",
            self.aggregator.element_count(),
            self.aggregator.attribute_count(),
            self.events
        );
        Ok(self.aggregator.finalize())
    }

    /// Apply one tokenizer event
    pub fn handle(&mut self, event: SaxEvent, offset: u64) -> Result<Step> {
        self.events += 1;
        log::trace!("event {} at {}: {:?}", self.events, offset, event);

        match event {
            SaxEvent::StartDocument => Ok(Step::Continue),

            SaxEvent::StartElement { name, attributes } => {
                if self.tracker.depth() == 0 {
                    if self.root_seen {
                        return Err(Error::malformed(
                            offset,
                            format!("second root element <{}>", name),
                        ));
                    }
                    self.root_seen = true;
                }

                let position = self.tracker.on_element_start(&name);
                let decision = MatchDecision::evaluate(position, self.pattern);

                if decision.capture_attributes {
                    self.aggregator.record_attributes(position.render(), attributes);
                }

                if self.early_termination && decision.beyond {
                    log::debug!(
                        "early termination at {}: nothing after it can match {}",
                        position,
                        self.pattern
                    );
                    return Ok(Step::Finish);
                }
                Ok(Step::Continue)
            }

            SaxEvent::EndElement { name } => match self.tracker.on_element_end() {
                Some(closed) => {
                    if closed.name != name {
                        log::trace!("end tag </{}> closed <{}>", name, closed.name);
                    }
                    Ok(Step::Continue)
                }
                None => Err(Error::malformed(
                    offset,
                    format!("end tag </{}> without open element", name),
                )),
            },

            SaxEvent::Characters(text) => {
                let position = self.tracker.position();
                if position.is_root() {
                    return Ok(Step::Continue);
                }
                if self.skip_whitespace_only && is_xml_whitespace(&text) {
                    return Ok(Step::Continue);
                }
                if is_exact_match(position, self.pattern) {
                    self.aggregator.record_text(position.render(), text);
                }
                Ok(Step::Continue)
            }

            SaxEvent::EndDocument => {
                if let Some(open) = self.tracker.position().last() {
                    return Err(Error::malformed(
                        offset,
                        format!("unexpected end of document, <{}> is not closed", open.name),
                    ));
                }
                if !self.root_seen {
                    return Err(Error::malformed(offset, "document has no root element"));
                }
                Ok(Step::Finish)
            }
        }
    }
}

fn is_xml_whitespace(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Open `source` and run one session over it with the quick-xml tokenizer
///
/// UTF-16 input is transcoded to UTF-8 before tokenizing.
pub fn execute(
    source: DocumentSource,
    pattern: &PathPattern,
    config: &ParserConfig,
    cancel: Option<CancelToken>,
) -> Result<ParseResult> {
    let (input, transcoded) = normalize_reader(source.open(config)?)?;
    let mut tokenizer = XmlTokenizer::new(input, config);
    if transcoded {
        tokenizer = tokenizer.with_utf8_input();
    }
    ParseSession::new(pattern, config)
        .with_cancel(cancel)
        .run(&mut tokenizer)
}
