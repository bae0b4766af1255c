//! One-Shot Callback Delivery
//!
//! Runs a session to completion on the calling thread and hands the outcome
//! to the callback. `FnOnce` makes a second invocation impossible.

use crate::config::ParserConfig;
use crate::error::Result;
use crate::path::PathPattern;
use crate::reader::DocumentSource;
use crate::result::ParseResult;
use crate::strategy::session::{execute, CancelToken};

/// Run the query and invoke `callback` exactly once with its outcome
///
/// With a token that fires mid-run the callback receives `Error::Cancelled`.
pub fn deliver<F>(
    source: DocumentSource,
    pattern: &PathPattern,
    config: &ParserConfig,
    cancel: Option<CancelToken>,
    callback: F,
) where
    F: FnOnce(Result<ParseResult>),
{
    let outcome = execute(source, pattern, config, cancel);
    if let Err(e) = &outcome {
        log::debug!("delivering failure for {}: {}", pattern, e);
    }
    callback(outcome);
}
