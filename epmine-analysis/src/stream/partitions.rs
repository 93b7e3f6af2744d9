//! Merging independently-recorded input partitions.
//!
//! Frequency thresholding needs one global pass, so per-partition event
//! extraction may fan out but must collapse into a single ordered sequence
//! before filtering.

use rayon::prelude::*;
use tracing::warn;

use epmine_core::Event;

/// Concatenate partition event lists in the given order. Stable and
/// deterministic: the caller fixes the partition order (typically archive
/// iteration order), and the result is the same on every run.
pub fn merge_partitions(partitions: Vec<Vec<Event>>) -> Vec<Event> {
    let total: usize = partitions.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    for (index, partition) in partitions.into_iter().enumerate() {
        if partition.is_empty() {
            warn!(partition = index, "partition contributed no events");
            continue;
        }
        merged.extend(partition);
    }
    merged
}

/// Extract events from every source in parallel, then merge in source
/// order. `extract` runs once per source; the fan-out is embarrassingly
/// parallel and the collect preserves input order.
pub fn collect_partitions<S, F>(sources: &[S], extract: F) -> Vec<Event>
where
    S: Sync,
    F: Fn(&S) -> Vec<Event> + Sync + Send,
{
    let partitions: Vec<Vec<Event>> = sources.par_iter().map(extract).collect();
    merge_partitions(partitions)
}
