//! Plain-text rendering of profiles and summaries.
//!
//! We keep formatting code in one place so the profiling and aggregation code
//! stays free of presentation concerns. The pipeline writes these blocks to
//! the debug log.

mod format;

pub use format::*;
