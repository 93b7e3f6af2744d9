//! # epmine-storage
//!
//! Newline-delimited text persistence for the pipeline boundary artifacts:
//! the event-stream file, the event-mapping file, and the learned-pattern
//! export. File failures propagate as plain `std::io::Error` — this layer
//! adds no wrapping and no retries.

pub mod pattern_io;
pub mod stream_io;
