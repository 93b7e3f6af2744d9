//! End-to-end pipeline: filter → mine → reduce → provenance index.

use std::collections::BTreeMap;

use tracing::{debug, info};

use epmine_core::{Episode, Event, EventStream, Fact, MiningConfig};

use crate::errors::MiningError;
use crate::mining::{maximal, EpisodeMiner};
use crate::postprocess::EnclosingMethods;
use crate::stream::{filter_stream, StreamStats};

/// Output of one full pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    /// The filtered stream the episodes were mined from.
    pub stream: EventStream,
    /// Counters describing the filtered stream.
    pub stats: StreamStats,
    /// All frequent episodes, keyed by plain-event count.
    pub episodes: BTreeMap<usize, Vec<Episode>>,
    /// The maximal subset of `episodes` — the final episode database.
    pub maximal: BTreeMap<usize, Vec<Episode>>,
    /// Per maximal episode, the source methods it was observed in.
    pub enclosing: Vec<(Episode, EnclosingMethods)>,
}

/// Chains the full episode-mining pipeline over a raw event sequence.
pub struct EpisodePipeline {
    config: MiningConfig,
}

impl EpisodePipeline {
    /// Create a pipeline; rejects configurations that cannot run.
    pub fn new(config: MiningConfig) -> Result<Self, MiningError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Run filter → mine → reduce → enclosing-methods indexing.
    pub fn run(&self, events: &[Event]) -> Result<PipelineResult, MiningError> {
        let min_frequency = self.config.effective_min_frequency();

        let stream = filter_stream(events, min_frequency)?;
        let stats = StreamStats::of(&stream);
        info!(%stats, "stream filtered");

        let episodes = EpisodeMiner::mine(&stream, min_frequency)?;
        if episodes.is_empty() {
            debug!("no frequent episodes at the size-1 level");
            return Ok(PipelineResult {
                stream,
                stats,
                episodes,
                maximal: BTreeMap::new(),
                enclosing: Vec::new(),
            });
        }

        let maximal = maximal::reduce(&episodes)?;
        info!(
            mined = episodes.values().map(Vec::len).sum::<usize>(),
            maximal = maximal.values().map(Vec::len).sum::<usize>(),
            "episodes reduced"
        );

        let enclosing = build_enclosing_index(
            &stream,
            &maximal,
            self.config.effective_order_sensitive(),
        );

        Ok(PipelineResult { stream, stats, episodes, maximal, enclosing })
    }
}

/// Replay every window against every maximal episode; the index itself
/// decides which windows match.
fn build_enclosing_index(
    stream: &EventStream,
    maximal: &BTreeMap<usize, Vec<Episode>>,
    order_sensitive: bool,
) -> Vec<(Episode, EnclosingMethods)> {
    let window_facts: Vec<Vec<Fact>> = stream
        .windows()
        .iter()
        .map(|w| w.ids().iter().map(|&id| Fact::event(id)).collect())
        .collect();

    maximal
        .values()
        .flatten()
        .map(|episode| {
            let mut index = EnclosingMethods::new(order_sensitive);
            for (window, facts) in stream.windows().iter().zip(&window_facts) {
                index.add_method(episode, facts, window.enclosing());
            }
            (episode.clone(), index)
        })
        .collect()
}
