//! Event-stream construction: filtering, partition merging, statistics.

pub mod filter;
pub mod partitions;
pub mod stats;

pub use filter::filter_stream;
pub use partitions::{collect_partitions, merge_partitions};
pub use stats::StreamStats;
