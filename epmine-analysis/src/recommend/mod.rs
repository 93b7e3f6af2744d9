//! Episode recommendation from the learned episode database.

pub mod recommender;

pub use recommender::{EpisodeRecommender, Proposal};
