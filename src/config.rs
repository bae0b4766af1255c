//! Parser Configuration
//!
//! Knobs shared by every delivery mode. Defaults mirror what a plain SAX
//! parser reports: untrimmed text, end-name checking on.

/// Buffer size for reading stream and file inputs
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Configuration for a query session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Trim whitespace around text chunks (empty chunks are dropped)
    pub trim_text: bool,
    /// Finalize as soon as no further match is possible
    pub early_termination: bool,
    /// Read buffer capacity for stream and file inputs
    pub buffer_capacity: usize,
    /// Reject end tags that do not match the open element
    pub check_end_names: bool,
    /// Drop character data consisting only of XML whitespace
    pub skip_whitespace_only: bool,
}

impl ParserConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        ParserConfig {
            trim_text: false,
            early_termination: true,
            buffer_capacity: DEFAULT_BUFFER_SIZE,
            check_end_names: true,
            skip_whitespace_only: false,
        }
    }

    pub fn with_trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    pub fn with_early_termination(mut self, enabled: bool) -> Self {
        self.early_termination = enabled;
        self
    }

    /// Set the read buffer capacity (clamped to at least 1 byte)
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    pub fn with_check_end_names(mut self, check: bool) -> Self {
        self.check_end_names = check;
        self
    }

    pub fn with_skip_whitespace_only(mut self, skip: bool) -> Self {
        self.skip_whitespace_only = skip;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
