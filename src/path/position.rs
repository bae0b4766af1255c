//! Traversal Positions
//!
//! The open-element stack as resolved name+index segments.

use super::parse_steps;
use super::segment::ResolvedSegment;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Current location in the document tree; empty at the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TraversalPosition {
    segments: Vec<ResolvedSegment>,
}

impl TraversalPosition {
    pub fn new() -> Self {
        TraversalPosition {
            segments: Vec::new(),
        }
    }

    pub fn from_segments(segments: Vec<ResolvedSegment>) -> Self {
        TraversalPosition { segments }
    }

    pub fn segments(&self) -> &[ResolvedSegment] {
        &self.segments
    }

    /// Depth of the position (0 at the root)
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&ResolvedSegment> {
        self.segments.last()
    }

    pub(crate) fn push(&mut self, segment: ResolvedSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) -> Option<ResolvedSegment> {
        self.segments.pop()
    }

    /// Render as `/name[i]/name[j]...`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TraversalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for TraversalPosition {
    type Err = Error;

    /// Parse a rendered position; every step must carry an index
    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let steps = parse_steps(expr).map_err(|msg| Error::invalid_path(expr, msg))?;
        let mut segments = Vec::with_capacity(steps.len());
        for (name, index) in steps {
            let index = index.ok_or_else(|| {
                Error::invalid_path(expr, format!("step '{}' has no index", name))
            })?;
            segments.push(ResolvedSegment::new(name, index));
        }
        Ok(TraversalPosition { segments })
    }
}
