//! Document Sources
//!
//! Inputs a query can read from. Each is opened into a buffered reader only
//! when the session starts. `http(s):` locators are fetched with a blocking
//! client and streamed from the response body.

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the document comes from
pub enum DocumentSource {
    /// Complete document in memory
    Bytes(Vec<u8>),
    /// Any readable byte stream
    Reader(Box<dyn Read + Send>),
    /// File on disk
    Path(PathBuf),
    /// Document locator: `file:`, `http:` or `https:`
    Url(Url),
}

impl DocumentSource {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        DocumentSource::Bytes(data.into())
    }

    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        DocumentSource::Reader(Box::new(reader))
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        DocumentSource::Path(path.into())
    }

    pub fn url(url: Url) -> Self {
        DocumentSource::Url(url)
    }

    /// Open the input for tokenizing
    ///
    /// Fails with `TokenizerUnavailable` when the input cannot be opened.
    pub fn open(self, config: &ParserConfig) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DocumentSource::Bytes(data) => Ok(Box::new(Cursor::new(data))),
            DocumentSource::Reader(reader) => Ok(Box::new(BufReader::with_capacity(
                config.buffer_capacity,
                reader,
            ))),
            DocumentSource::Path(path) => open_file(path, config),
            DocumentSource::Url(url) => match url.scheme() {
                "file" => {
                    let path = url.to_file_path().map_err(|_| {
                        Error::TokenizerUnavailable(format!("{} is not a local file path", url))
                    })?;
                    open_file(path, config)
                }
                "http" | "https" => fetch(&url, config),
                scheme => Err(Error::TokenizerUnavailable(format!(
                    "unsupported URL scheme '{}' in {}",
                    scheme, url
                ))),
            },
        }
    }
}

/// Request `url` and stream the response body
///
/// Connection failures and non-success statuses are `TokenizerUnavailable`.
/// No request timeout is applied.
fn fetch(url: &Url, config: &ParserConfig) -> Result<Box<dyn BufRead + Send>> {
    log::debug!("fetching {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| Error::TokenizerUnavailable(format!("cannot build HTTP client: {}", e)))?;
    let response = client
        .get(url.clone())
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| Error::TokenizerUnavailable(format!("cannot fetch {}: {}", url, e)))?;
    Ok(Box::new(BufReader::with_capacity(config.buffer_capacity, response)))
}

fn open_file(path: PathBuf, config: &ParserConfig) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(&path).map_err(|e| {
        Error::TokenizerUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufReader::with_capacity(config.buffer_capacity, file)))
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Bytes(data) => write!(f, "Bytes({} bytes)", data.len()),
            DocumentSource::Reader(_) => f.write_str("Reader(..)"),
            DocumentSource::Path(path) => write!(f, "Path({})", path.display()),
            DocumentSource::Url(url) => write!(f, "Url({})", url),
        }
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(data: Vec<u8>) -> Self {
        DocumentSource::Bytes(data)
    }
}

impl From<&[u8]> for DocumentSource {
    fn from(data: &[u8]) -> Self {
        DocumentSource::Bytes(data.to_vec())
    }
}

impl From<&str> for DocumentSource {
    fn from(text: &str) -> Self {
        DocumentSource::Bytes(text.as_bytes().to_vec())
    }
}

impl From<Url> for DocumentSource {
    fn from(url: Url) -> Self {
        DocumentSource::Url(url)
    }
}
