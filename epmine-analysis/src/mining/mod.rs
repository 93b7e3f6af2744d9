//! Frequent-episode discovery and maximal reduction.

pub mod maximal;
pub mod miner;

pub use maximal::reduce;
pub use miner::EpisodeMiner;
