//! Match Evaluator
//!
//! Structural comparisons between the current position and a pattern:
//!
//! - `is_prefix_compatible`: attributes are captured here
//! - `is_exact_match`: text is captured here
//! - `is_beyond_pattern`: no later element can match, the session may stop

use crate::path::{PathPattern, TraversalPosition};

/// Whether every segment shared by `position` and `pattern` agrees
///
/// Only the first `min(m, n)` segments are compared, so this holds for
/// ancestors of a possible match and for descendants of a match.
pub fn is_prefix_compatible(position: &TraversalPosition, pattern: &PathPattern) -> bool {
    position
        .segments()
        .iter()
        .zip(pattern.segments())
        .all(|(resolved, step)| step.matches(resolved))
}

/// Whether `position` satisfies every step of `pattern` at equal depth
pub fn is_exact_match(position: &TraversalPosition, pattern: &PathPattern) -> bool {
    position.depth() == pattern.len() && is_prefix_compatible(position, pattern)
}

/// Whether document order rules out any further match
///
/// Walks the shared segments from the root. A segment can only prove the
/// position is past the pattern if every segment above it is pinned to the
/// single subtree a match could live in: same name and either an explicit
/// index equal to the position's, or the document root (which has no
/// siblings). At a pinned level, the same name with an index above the
/// pattern's bound means every sibling that could match has already closed.
///
/// A different name or a wildcard step above the root ends the walk with
/// `false`: later siblings may still match.
pub fn is_beyond_pattern(position: &TraversalPosition, pattern: &PathPattern) -> bool {
    for (depth, (resolved, step)) in position
        .segments()
        .iter()
        .zip(pattern.segments())
        .enumerate()
    {
        if resolved.name != step.name {
            return false;
        }
        match step.index {
            Some(bound) if resolved.index > bound => return true,
            Some(bound) if resolved.index < bound => return false,
            Some(_) => {}
            // The root element is unique, so a wildcard there pins nothing new.
            None if depth == 0 => {}
            None => return false,
        }
    }
    false
}

/// The three decisions for one position, evaluated together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDecision {
    pub capture_attributes: bool,
    pub capture_text: bool,
    pub beyond: bool,
}

impl MatchDecision {
    pub fn evaluate(position: &TraversalPosition, pattern: &PathPattern) -> Self {
        MatchDecision {
            capture_attributes: is_prefix_compatible(position, pattern),
            capture_text: is_exact_match(position, pattern),
            beyond: is_beyond_pattern(position, pattern),
        }
    }
}
