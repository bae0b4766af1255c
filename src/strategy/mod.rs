//! Delivery Strategy Module
//!
//! Every query runs one `ParseSession`. The strategies differ in how its
//! outcome reaches the caller:
//! - Callback: runs on the calling thread, invokes an `FnOnce` exactly once
//! - Stream: single-value `futures::Stream` on a blocking worker, cancellable
//! - Parallel: one session per pattern on Rayon, results in pattern order

pub mod callback;
pub mod parallel;
pub mod session;
pub mod stream;

pub use callback::deliver;
pub use parallel::{query_map, query_parallel};
pub use session::{execute, CancelToken, ParseSession, Step};
pub use stream::ResultStream;
