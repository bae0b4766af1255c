//! SAX Module
//!
//! Event vocabulary shared by tokenizers and sessions, plus the tracker that
//! turns start/end events into resolved positions.
//!
//! ```text
//! Tokenizer ---> SaxEvent ---> TraversalTracker ---> TraversalPosition
//! ```

pub mod events;
pub mod tracker;

pub use events::SaxEvent;
pub use tracker::TraversalTracker;
