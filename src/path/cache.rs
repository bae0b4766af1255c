//! Pattern Cache
//!
//! LRU cache of parsed path expressions for callers that issue the same
//! textual queries repeatedly. The cache is owned by the caller; sessions
//! never share one implicitly.

use super::pattern::PathPattern;
use crate::error::Result;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached expressions
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// LRU cache mapping expression text to parsed patterns
pub struct PatternCache {
    entries: LruCache<String, PathPattern>,
}

impl PatternCache {
    /// Create a cache holding up to `capacity` expressions (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        PatternCache {
            entries: LruCache::new(capacity),
        }
    }

    /// Return the cached pattern for `expr`, parsing and storing it on a miss
    ///
    /// Parse failures are not cached.
    pub fn get_or_parse(&mut self, expr: &str) -> Result<PathPattern> {
        if let Some(pattern) = self.entries.get(expr) {
            return Ok(pattern.clone());
        }
        let pattern: PathPattern = expr.parse()?;
        self.entries.put(expr.to_string(), pattern.clone());
        Ok(pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
