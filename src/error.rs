//! Error Types
//!
//! Every failure a query can report. Errors are terminal for the session that
//! produced them and are delivered exactly once.

use std::sync::Arc;
use thiserror::Error;

/// Errors reported by a query session
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The tokenizer could not be constructed from the given input
    #[error("Tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),

    /// The tokenizer reported a syntax or well-formedness error mid-stream
    #[error("Malformed document at byte {position}: {message}")]
    MalformedDocument { position: u64, message: String },

    /// The tokenizer rejected well-formed markup (bad escapes, invalid attributes, encoding)
    #[error("Invalid document at byte {position}: {message}")]
    DocumentInvalid { position: u64, message: String },

    /// Reading the underlying input failed
    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// A textual path expression could not be parsed
    #[error("Invalid path expression '{expr}': {message}")]
    InvalidPath { expr: String, message: String },

    /// The session was cancelled before it produced a result
    #[error("Query cancelled")]
    Cancelled,

    /// The worker running a streamed session ended without reporting (it panicked)
    #[error("Query worker failed: {0}")]
    WorkerFailed(String),
}

impl Error {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Error::MalformedDocument {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid(position: u64, message: impl Into<String>) -> Self {
        Error::DocumentInvalid {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_path(expr: &str, message: impl Into<String>) -> Self {
        Error::InvalidPath {
            expr: expr.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error came from the document content rather than the input plumbing
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedDocument { .. } | Error::DocumentInvalid { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(Arc::new(e))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
