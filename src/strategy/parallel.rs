//! Parallel Pattern Evaluation
//!
//! Uses Rayon to run one independent session per pattern over the same
//! in-memory document.

use crate::config::ParserConfig;
use crate::error::Result;
use crate::path::PathPattern;
use crate::reader::encoding::normalize_bytes;
use crate::reader::XmlTokenizer;
use crate::result::ParseResult;
use crate::strategy::session::ParseSession;
use rayon::prelude::*;

fn evaluate(
    document: &[u8],
    transcoded: bool,
    pattern: &PathPattern,
    config: &ParserConfig,
) -> Result<ParseResult> {
    let mut tokenizer = XmlTokenizer::new(document, config);
    if transcoded {
        tokenizer = tokenizer.with_utf8_input();
    }
    ParseSession::new(pattern, config).run(&mut tokenizer)
}

/// Evaluate multiple patterns in parallel
///
/// Results come back in the order of `patterns`; each one is what a
/// standalone query with that pattern would produce.
pub fn query_parallel(
    document: &[u8],
    patterns: &[PathPattern],
    config: &ParserConfig,
) -> Vec<Result<ParseResult>> {
    log::debug!("evaluating {} patterns in parallel", patterns.len());
    let (document, transcoded) = match normalize_bytes(document) {
        Ok(normalized) => normalized,
        Err(e) => return patterns.iter().map(|_| Err(e.clone())).collect(),
    };
    patterns
        .par_iter()
        .map(|pattern| evaluate(&document, transcoded, pattern, config))
        .collect()
}

/// Evaluate keyed path expressions in parallel
///
/// Fails with the first expression or document error encountered.
pub fn query_map(
    document: &[u8],
    queries: &[(&str, &str)], // (key, expression)
    config: &ParserConfig,
) -> Result<Vec<(String, ParseResult)>> {
    let (document, transcoded) = normalize_bytes(document)?;
    queries
        .par_iter()
        .map(|(key, expr)| {
            let pattern: PathPattern = expr.parse()?;
            evaluate(&document, transcoded, &pattern, config).map(|r| (key.to_string(), r))
        })
        .collect()
}
