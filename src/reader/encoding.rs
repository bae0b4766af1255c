//! Input Encoding Detection
//!
//! quick-xml scans raw bytes for ASCII markup, so it handles UTF-8 and any
//! ASCII-compatible encoding named in the XML declaration. UTF-16 input is
//! detected from its BOM or first bytes and transcoded to UTF-8 up front.
//! Transcoding needs the whole document, so UTF-16 streams are buffered.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::io::{BufRead, Cursor, Read};

/// Byte layout of the input as far as the tokenizer cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    /// UTF-8 or another ASCII-compatible encoding
    AsciiCompatible,
    Utf16Le,
    Utf16Be,
}

impl InputEncoding {
    /// Detect from the byte order mark or the first two bytes
    pub fn detect(prefix: &[u8]) -> Self {
        match prefix {
            [0xFF, 0xFE, ..] | [b'<', 0x00, ..] => InputEncoding::Utf16Le,
            [0xFE, 0xFF, ..] | [0x00, b'<', ..] => InputEncoding::Utf16Be,
            _ => InputEncoding::AsciiCompatible,
        }
    }

    pub fn is_utf16(self) -> bool {
        self != InputEncoding::AsciiCompatible
    }
}

/// Transcode UTF-16 bytes (BOM optional) to UTF-8
///
/// Odd lengths and unpaired surrogates are `DocumentInvalid`, positioned at
/// the offending byte of the original input.
pub fn transcode_utf16(input: &[u8], encoding: InputEncoding) -> Result<Vec<u8>> {
    let (has_bom, little_endian) = match encoding {
        InputEncoding::Utf16Le => (input.starts_with(&[0xFF, 0xFE]), true),
        InputEncoding::Utf16Be => (input.starts_with(&[0xFE, 0xFF]), false),
        InputEncoding::AsciiCompatible => return Ok(input.to_vec()),
    };
    let bom = if has_bom { 2 } else { 0 };

    let body = &input[bom..];
    if body.len() % 2 != 0 {
        return Err(Error::invalid(
            input.len() as u64,
            "UTF-16 input has an odd number of bytes",
        ));
    }

    let units = body.chunks_exact(2).map(|pair| {
        if little_endian {
            u16::from_le_bytes([pair[0], pair[1]])
        } else {
            u16::from_be_bytes([pair[0], pair[1]])
        }
    });
    let mut out = String::with_capacity(body.len());
    for (i, decoded) in char::decode_utf16(units).enumerate() {
        match decoded {
            Ok(c) => out.push(c),
            Err(e) => {
                return Err(Error::invalid(
                    (bom + i * 2) as u64,
                    format!("unpaired surrogate {:#06x} in UTF-16 input", e.unpaired_surrogate()),
                ))
            }
        }
    }
    Ok(out.into_bytes())
}

/// In-memory document as UTF-8 (or ASCII-compatible) bytes
///
/// The flag is `true` when the bytes were transcoded and must be read as
/// UTF-8 regardless of what the declaration says.
pub(crate) fn normalize_bytes(document: &[u8]) -> Result<(Cow<'_, [u8]>, bool)> {
    let encoding = InputEncoding::detect(document);
    if !encoding.is_utf16() {
        return Ok((Cow::Borrowed(document), false));
    }
    log::debug!("transcoding {:?} document of {} bytes", encoding, document.len());
    Ok((Cow::Owned(transcode_utf16(document, encoding)?), true))
}

/// Same as [`normalize_bytes`] for an opened input stream
pub(crate) fn normalize_reader(
    mut input: Box<dyn BufRead + Send>,
) -> Result<(Box<dyn BufRead + Send>, bool)> {
    let encoding = InputEncoding::detect(input.fill_buf()?);
    if !encoding.is_utf16() {
        return Ok((input, false));
    }

    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;
    log::debug!("transcoding {:?} stream of {} bytes", encoding, raw.len());
    let utf8 = transcode_utf16(&raw, encoding)?;
    Ok((Box::new(Cursor::new(utf8)), true))
}
