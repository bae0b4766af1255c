//! Path Segments
//!
//! One step of a pattern (index optional) or of a position (index always known).

use std::fmt;

/// A pattern step: element name plus an optional 1-based sibling index
///
/// `index == None` matches any sibling index at this level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<usize>,
}

impl PathSegment {
    /// Create a wildcard segment
    pub fn any(name: impl Into<String>) -> Self {
        PathSegment {
            name: name.into(),
            index: None,
        }
    }

    /// Create a segment pinned to the `index`-th (1-based) occurrence of `name`
    pub fn nth(name: impl Into<String>, index: usize) -> Self {
        PathSegment {
            name: name.into(),
            index: Some(index.max(1)),
        }
    }

    /// Whether this segment accepts any sibling index
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.index.is_none()
    }

    /// Whether a resolved segment satisfies this step
    #[inline]
    pub fn matches(&self, resolved: &ResolvedSegment) -> bool {
        self.name == resolved.name && self.index.map_or(true, |i| i == resolved.index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "/{}[{}]", self.name, i),
            None => write!(f, "/{}", self.name),
        }
    }
}

/// A position step: element name and its concrete 1-based sibling index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedSegment {
    pub name: String,
    pub index: usize,
}

impl ResolvedSegment {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        ResolvedSegment {
            name: name.into(),
            index,
        }
    }
}

impl fmt::Display for ResolvedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}[{}]", self.name, self.index)
    }
}
