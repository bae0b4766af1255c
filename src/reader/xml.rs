//! quick-xml Tokenizer
//!
//! Adapts `quick_xml::Reader` to the session's event vocabulary. Text is
//! reported chunk by chunk exactly as quick-xml splits it: entity references
//! and CDATA sections arrive as their own chunks.
//!
//! Names, text and attribute values are decoded with the encoding from the
//! XML declaration (UTF-8 when absent). Empty elements are expanded by the
//! reader into a start and an end event.

use super::Tokenizer;
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::sax::SaxEvent;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Decoder, Reader};
use std::borrow::Cow;
use std::io::BufRead;

/// SAX tokenizer over any buffered input
pub struct XmlTokenizer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    started: bool,
    /// Input was transcoded to UTF-8; the declared encoding no longer applies
    utf8_input: bool,
    offset: u64,
}

impl<R: BufRead> XmlTokenizer<R> {
    pub fn new(input: R, config: &ParserConfig) -> Self {
        let mut reader = Reader::from_reader(input);
        let reader_config = reader.config_mut();
        reader_config.trim_text(config.trim_text);
        reader_config.expand_empty_elements = true;
        reader_config.check_end_names = config.check_end_names;

        XmlTokenizer {
            reader,
            buf: Vec::with_capacity(1024),
            started: false,
            utf8_input: false,
            offset: 0,
        }
    }

    /// Read the input as UTF-8 whatever its declaration says
    pub fn with_utf8_input(mut self) -> Self {
        self.utf8_input = true;
        self
    }
}

impl<R: BufRead> Tokenizer for XmlTokenizer<R> {
    fn next_event(&mut self) -> Result<SaxEvent> {
        if !self.started {
            self.started = true;
            return Ok(SaxEvent::StartDocument);
        }

        loop {
            self.buf.clear();
            let offset = self.reader.buffer_position();
            self.offset = offset;

            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| classify_error(e, offset))?;
            let text = TextDecoder {
                decoder: self.reader.decoder(),
                utf8_input: self.utf8_input,
                offset,
            };

            match event {
                Event::Start(start) => {
                    return Ok(SaxEvent::StartElement {
                        name: text.decode(start.name().as_ref())?.into_owned(),
                        attributes: collect_attributes(&start, &text)?,
                    });
                }
                Event::End(end) => {
                    return Ok(SaxEvent::EndElement {
                        name: text.decode(end.name().as_ref())?.into_owned(),
                    });
                }
                Event::Text(raw) => {
                    let decoded = text.decode(&raw)?;
                    let unescaped = text.unescape(&decoded)?;
                    if unescaped.is_empty() {
                        continue;
                    }
                    return Ok(SaxEvent::Characters(unescaped));
                }
                Event::CData(cdata) => {
                    let decoded = text.decode(&cdata)?;
                    if decoded.is_empty() {
                        continue;
                    }
                    return Ok(SaxEvent::Characters(decoded.into_owned()));
                }
                Event::GeneralRef(reference) => {
                    let name = text.decode(&reference)?;
                    let entity = format!("&{};", name);
                    return Ok(SaxEvent::Characters(text.unescape(&entity)?));
                }
                Event::Eof => return Ok(SaxEvent::EndDocument),
                // Declarations, comments, processing instructions, doctype
                _ => continue,
            }
        }
    }

    fn offset(&self) -> u64 {
        self.offset
    }
}

/// Decoding context for one event
struct TextDecoder {
    decoder: Decoder,
    utf8_input: bool,
    offset: u64,
}

impl TextDecoder {
    fn decode<'b>(&self, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
        if self.utf8_input {
            return std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| Error::invalid(self.offset, e.to_string()));
        }
        self.decoder
            .decode(bytes)
            .map_err(|e| Error::invalid(self.offset, e.to_string()))
    }

    fn unescape(&self, raw: &str) -> Result<String> {
        unescape(raw)
            .map(Cow::into_owned)
            .map_err(|e| Error::invalid(self.offset, e.to_string()))
    }
}

fn collect_attributes(start: &BytesStart<'_>, text: &TextDecoder) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::invalid(text.offset, e.to_string()))?;
        let key = text.decode(attr.key.as_ref())?.into_owned();
        let raw = text.decode(&attr.value)?;
        attributes.push((key, text.unescape(&raw)?));
    }
    Ok(attributes)
}

/// Map quick-xml failures onto session error kinds
fn classify_error(err: quick_xml::Error, offset: u64) -> Error {
    match err {
        quick_xml::Error::Io(io) => Error::Io(io),
        quick_xml::Error::Syntax(e) => Error::malformed(offset, e.to_string()),
        quick_xml::Error::IllFormed(e) => Error::malformed(offset, e.to_string()),
        other => Error::invalid(offset, other.to_string()),
    }
}
