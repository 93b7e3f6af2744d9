//! Ranking of learned episodes that extend a partial query.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use epmine_core::{Episode, Fact, FxHashMap, InvalidInputError, Query, TieBreak};

/// One ranked recommendation: a learned episode extending the query and its
/// conditional-frequency estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub episode: Episode,
    pub probability: f64,
}

/// Scores and ranks learned episodes against a partial query.
///
/// A learned episode is a candidate iff its plain-event fact set strictly
/// extends the query's and none of its relations contradicts a relation the
/// query already states. The probability estimate is the candidate's
/// frequency normalized over all candidates in the same plain-event-count
/// tier, rounded half-up to three decimals before comparison.
pub struct EpisodeRecommender {
    tie_break: TieBreak,
}

impl EpisodeRecommender {
    pub fn new() -> Self {
        Self { tie_break: TieBreak::default() }
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn get_proposals(
        &self,
        query: &Query,
        learned: &BTreeMap<usize, Vec<Episode>>,
        top_n: usize,
    ) -> Result<Vec<Proposal>, InvalidInputError> {
        if learned.is_empty() {
            return Err(InvalidInputError::EmptyCollection { what: "learned episode map" });
        }
        if top_n == 0 {
            return Err(InvalidInputError::NonPositiveProposalCount);
        }
        if query.event_ids().is_empty() {
            return Err(InvalidInputError::EmptyQuery);
        }

        // Candidates in declared order: level ascending, list order within.
        let candidates: Vec<&Episode> = learned
            .values()
            .flatten()
            .filter(|episode| extends(episode, query))
            .collect();

        // Normalize within each plain-event-count tier.
        let mut tier_sums: FxHashMap<usize, u64> = FxHashMap::default();
        for candidate in &candidates {
            *tier_sums.entry(candidate.num_events()).or_insert(0) += u64::from(candidate.frequency());
        }

        let mut proposals: Vec<Proposal> = candidates
            .into_iter()
            .map(|candidate| {
                let tier_sum = tier_sums[&candidate.num_events()];
                let probability =
                    round3(f64::from(candidate.frequency()) / tier_sum as f64);
                Proposal { episode: candidate.clone(), probability }
            })
            .collect();

        // Stable sort: equal rounded probabilities keep declared order
        // unless the configured policy says otherwise.
        let tie_break = self.tie_break;
        proposals.sort_by(|a, b| {
            let by_probability = b
                .probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal);
            by_probability.then_with(|| match tie_break {
                TieBreak::DeclarationOrder => Ordering::Equal,
                TieBreak::NumEventsDesc => b.episode.num_events().cmp(&a.episode.num_events()),
                TieBreak::FrequencyDesc => b.episode.frequency().cmp(&a.episode.frequency()),
            })
        });

        proposals.truncate(top_n);
        Ok(proposals)
    }
}

impl Default for EpisodeRecommender {
    fn default() -> Self {
        Self::new()
    }
}

/// Strict-superset extension check with relation compatibility.
fn extends(candidate: &Episode, query: &Query) -> bool {
    let candidate_events = candidate.event_ids();
    let query_events = query.event_ids();

    if !query_events.is_subset(&candidate_events)
        || candidate_events.len() == query_events.len()
    {
        return false;
    }

    // The same relation or no relation at all is acceptable; the reversed
    // relation contradicts the query.
    query
        .relations()
        .all(|(a, b)| !candidate.contains_fact(&Fact::relation(b, a)))
}

/// Half-up rounding to three decimals, for deterministic comparison across
/// runs.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
