//! Path Patterns
//!
//! Immutable, value-semantics description of the location a query targets.

use super::parse_steps;
use super::segment::PathSegment;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Ordered sequence of pattern segments
///
/// Built one navigation step at a time; every step returns a new pattern and
/// leaves the receiver untouched.
///
/// ```
/// use xmlsift::PathPattern;
///
/// let pattern = PathPattern::new()
///     .append("package")
///     .append("metadata")
///     .with_index(0)
///     .append("language");
/// assert_eq!(pattern.to_string(), "/package/metadata[1]/language");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathPattern {
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Create an empty pattern (the document root)
    pub fn new() -> Self {
        PathPattern {
            segments: Vec::new(),
        }
    }

    /// Build a pattern from prepared segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        PathPattern { segments }
    }

    /// Extend by one wildcard-indexed step for `name`
    pub fn append(&self, name: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(PathSegment::any(name));
        PathPattern { segments }
    }

    /// Pin the last step to the `index`-th sibling (0-based input, stored 1-based)
    ///
    /// Calling this on an empty pattern returns it unchanged.
    pub fn with_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) => last.index = Some(index + 1),
            None => log::debug!("with_index({}) on an empty pattern ignored", index),
        }
        PathPattern { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether any step is pinned to an index
    pub fn has_constraints(&self) -> bool {
        self.segments.iter().any(|s| !s.is_wildcard())
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for PathPattern {
    type Err = Error;

    /// Parse the rendered form: `/name`, `/name[n]` steps with 1-based indices
    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let steps = parse_steps(expr).map_err(|msg| Error::invalid_path(expr, msg))?;
        let segments = steps
            .into_iter()
            .map(|(name, index)| PathSegment {
                name: name.to_string(),
                index,
            })
            .collect();
        Ok(PathPattern { segments })
    }
}
