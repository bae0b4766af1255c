//! Traversal Tracker
//!
//! Keeps the current position in step with the tokenizer and assigns sibling
//! indices as elements open.
//!
//! Sibling counters are keyed by (parent position, child name). A parent
//! position can only receive children while it is open, and once closed it
//! never reappears (its next same-name sibling gets a higher index), so the
//! counters live in one frame per open element and are dropped with it.

use crate::path::{ResolvedSegment, TraversalPosition};
use std::collections::HashMap;

/// Position bookkeeping for one session
#[derive(Debug)]
pub struct TraversalTracker {
    position: TraversalPosition,
    /// `frames[d]` counts children opened under the element at depth `d`
    /// (`frames[0]` is the document itself)
    frames: Vec<HashMap<String, usize>>,
}

impl TraversalTracker {
    pub fn new() -> Self {
        TraversalTracker {
            position: TraversalPosition::new(),
            frames: vec![HashMap::new()],
        }
    }

    /// Current position
    #[inline]
    pub fn position(&self) -> &TraversalPosition {
        &self.position
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.position.depth()
    }

    /// Record an opened element and return the position it now occupies
    pub fn on_element_start(&mut self, name: &str) -> &TraversalPosition {
        let depth = self.position.depth();
        let counter = self.frames[depth].entry(name.to_string()).or_insert(0);
        *counter += 1;
        let index = *counter;

        self.position.push(ResolvedSegment::new(name, index));
        self.frames.push(HashMap::new());
        &self.position
    }

    /// Unwind the most recently opened element
    ///
    /// Returns `None` when nothing is open.
    pub fn on_element_end(&mut self) -> Option<ResolvedSegment> {
        let closed = self.position.pop()?;
        self.frames.pop();
        Some(closed)
    }

    /// Number of times `name` has been opened directly under the current position
    pub fn sibling_count(&self, name: &str) -> usize {
        self.frames
            .last()
            .and_then(|frame| frame.get(name))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for TraversalTracker {
    fn default() -> Self {
        Self::new()
    }
}
