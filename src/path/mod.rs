//! Path Model
//!
//! Patterns describe where the caller wants data; positions describe where the
//! parser currently is. Both render to the same textual form:
//!
//! ```text
//! /package[1]/metadata[2]/language[1]    position (every index present)
//! /package/metadata[2]/language          pattern (missing index = any sibling)
//! ```

pub mod cache;
pub mod pattern;
pub mod position;
pub mod segment;

pub use cache::PatternCache;
pub use pattern::PathPattern;
pub use position::TraversalPosition;
pub use segment::{PathSegment, ResolvedSegment};

use memchr::{memchr, memchr_iter};

/// Split a rendered path into `(name, index)` steps
///
/// The leading slash is optional; `""` and `"/"` yield no steps.
pub(crate) fn parse_steps(expr: &str) -> Result<Vec<(&str, Option<usize>)>, String> {
    let body = expr.strip_prefix('/').unwrap_or(expr);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = body.as_bytes();
    let mut steps = Vec::new();
    let mut start = 0;
    for slash in memchr_iter(b'/', bytes).chain(std::iter::once(bytes.len())) {
        steps.push(parse_step(&body[start..slash])?);
        start = slash + 1;
    }
    Ok(steps)
}

fn parse_step(step: &str) -> Result<(&str, Option<usize>), String> {
    if step.is_empty() {
        return Err("empty step".to_string());
    }

    let (name, index) = match memchr(b'[', step.as_bytes()) {
        Some(open) => {
            let inner = step[open + 1..]
                .strip_suffix(']')
                .ok_or_else(|| format!("unterminated index in '{}'", step))?;
            let index: usize = inner
                .parse()
                .map_err(|_| format!("index '{}' is not a positive integer", inner))?;
            if index == 0 {
                return Err(format!("index in '{}' must be 1 or greater", step));
            }
            (&step[..open], Some(index))
        }
        None => (step, None),
    };

    if name.is_empty() {
        return Err(format!("missing element name in '{}'", step));
    }
    if name.contains(']') {
        return Err(format!("stray ']' in '{}'", step));
    }
    Ok((name, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_mixed() {
        let steps = parse_steps("/package/metadata[2]/dc:title").unwrap();
        assert_eq!(
            steps,
            vec![("package", None), ("metadata", Some(2)), ("dc:title", None)]
        );
    }

    #[test]
    fn test_parse_steps_root() {
        assert!(parse_steps("").unwrap().is_empty());
        assert!(parse_steps("/").unwrap().is_empty());
    }

    #[test]
    fn test_parse_steps_without_leading_slash() {
        let steps = parse_steps("a[1]/b").unwrap();
        assert_eq!(steps, vec![("a", Some(1)), ("b", None)]);
    }

    #[test]
    fn test_parse_steps_rejects_bad_input() {
        assert!(parse_steps("/a//b").is_err());
        assert!(parse_steps("/a/").is_err());
        assert!(parse_steps("/a[0]").is_err());
        assert!(parse_steps("/a[x]").is_err());
        assert!(parse_steps("/a[1").is_err());
        assert!(parse_steps("/[1]").is_err());
        assert!(parse_steps("/a]").is_err());
    }
}
