//! Mining configuration.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInputError;

/// How the recommender breaks ties between equal rounded probabilities.
///
/// Probability ties have no single natural order, so the policy is explicit
/// and configurable instead of baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the insertion order of the learned-episode map.
    #[default]
    DeclarationOrder,
    /// Prefer candidates with more plain-event facts.
    NumEventsDesc,
    /// Prefer candidates with higher support frequency.
    FrequencyDesc,
}

/// Configuration for the episode-mining pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum window support for events and episodes. Default: 2.
    pub min_frequency: Option<u32>,
    /// Whether the enclosing-methods index checks ordering relations.
    /// Default: false.
    pub order_sensitive: Option<bool>,
    /// Tie-break policy for the recommender. Default: declaration order.
    pub tie_break: Option<TieBreak>,
    /// Maximum number of proposals returned per query. Default: 10.
    pub top_n: Option<usize>,
    /// Worker threads for partition extraction. None/0 = rayon default.
    pub threads: Option<usize>,
}

impl MiningConfig {
    /// Returns the effective minimum frequency, defaulting to 2.
    pub fn effective_min_frequency(&self) -> u32 {
        self.min_frequency.unwrap_or(2)
    }

    /// Returns whether order-sensitive matching is enabled, defaulting to
    /// false.
    pub fn effective_order_sensitive(&self) -> bool {
        self.order_sensitive.unwrap_or(false)
    }

    /// Returns the effective tie-break policy.
    pub fn effective_tie_break(&self) -> TieBreak {
        self.tie_break.unwrap_or_default()
    }

    /// Returns the effective proposal cap, defaulting to 10.
    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(10)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.min_frequency == Some(0) {
            return Err(InvalidInputError::NonPositiveThreshold);
        }
        if self.top_n == Some(0) {
            return Err(InvalidInputError::NonPositiveProposalCount);
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from a TOML file; malformed content surfaces as
    /// `io::ErrorKind::InvalidData`.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
