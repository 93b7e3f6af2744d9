//! Level-wise frequent-episode discovery over windowed event streams.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use epmine_core::{Episode, EventStream, Fact, InvalidInputError, StreamWindow};

/// Canonical candidate representation: a fact set is its own identity,
/// independent of discovery order.
type FactSet = BTreeSet<Fact>;

/// Discovers frequent episodes by level-wise candidate extension.
///
/// Enumeration proceeds over fact count: size-1 candidates are the distinct
/// event ids observed in any window; each level extends a frequent episode
/// by exactly one fact — a new co-occurring event, or a precedence relation
/// between two events already present. Support is the exact count of
/// windows satisfying every fact. Candidates below the threshold are
/// discarded and never extended.
///
/// The published map is keyed by plain-event count, the level structure the
/// reducer and recommender consume.
pub struct EpisodeMiner;

impl EpisodeMiner {
    pub fn mine(
        stream: &EventStream,
        min_frequency: u32,
    ) -> Result<BTreeMap<usize, Vec<Episode>>, InvalidInputError> {
        Self::mine_windows(stream.windows(), min_frequency)
    }

    pub fn mine_windows(
        windows: &[StreamWindow],
        min_frequency: u32,
    ) -> Result<BTreeMap<usize, Vec<Episode>>, InvalidInputError> {
        if min_frequency == 0 {
            return Err(InvalidInputError::NonPositiveThreshold);
        }

        let mut frequent: Vec<(FactSet, u32)> = Vec::new();

        // Level 1: distinct single-event facts.
        let mut current: Vec<FactSet> = Vec::new();
        let mut frequent_ids: BTreeSet<u32> = BTreeSet::new();
        for id in distinct_ids(windows) {
            let candidate: FactSet = [Fact::event(id)].into_iter().collect();
            let support = count_support(windows, &candidate);
            if support >= min_frequency {
                frequent_ids.insert(id);
                frequent.push((candidate.clone(), support));
                current.push(candidate);
            }
        }

        // Extend level by level until no candidate survives.
        while !current.is_empty() {
            let mut candidates: BTreeSet<FactSet> = BTreeSet::new();
            for fact_set in &current {
                extend(fact_set, &frequent_ids, &mut candidates);
            }

            let mut next: Vec<FactSet> = Vec::new();
            for candidate in candidates {
                let support = count_support(windows, &candidate);
                if support >= min_frequency {
                    frequent.push((candidate.clone(), support));
                    next.push(candidate);
                }
            }
            debug!(
                level = current.first().map(|s| s.len() + 1).unwrap_or(0),
                retained = next.len(),
                "episode level mined"
            );
            current = next;
        }

        build_level_map(frequent)
    }
}

/// All event ids observed in any window, ascending.
fn distinct_ids(windows: &[StreamWindow]) -> BTreeSet<u32> {
    windows
        .iter()
        .flat_map(|w| w.ids().iter().copied())
        .collect()
}

/// Generate every single-fact extension of `fact_set`: a frequent event not
/// yet present, or a relation between two present events with no relation
/// between them yet.
fn extend(fact_set: &FactSet, frequent_ids: &BTreeSet<u32>, out: &mut BTreeSet<FactSet>) {
    let events: BTreeSet<u32> = fact_set.iter().filter_map(Fact::event_id).collect();

    for &id in frequent_ids {
        if !events.contains(&id) {
            let mut candidate = fact_set.clone();
            candidate.insert(Fact::event(id));
            out.insert(candidate);
        }
    }

    for &a in &events {
        for &b in &events {
            if a == b
                || fact_set.contains(&Fact::relation(a, b))
                || fact_set.contains(&Fact::relation(b, a))
            {
                continue;
            }
            let mut candidate = fact_set.clone();
            candidate.insert(Fact::relation(a, b));
            out.insert(candidate);
        }
    }
}

/// A window supports a fact set iff every plain-event fact occurs in it and
/// every relation `a>b` is witnessed by first occurrences.
fn supports(window: &StreamWindow, fact_set: &FactSet) -> bool {
    fact_set.iter().all(|fact| match fact {
        Fact::Event(id) => window.contains(*id),
        Fact::Relation(a, b) => match (window.first_position(*a), window.first_position(*b)) {
            (Some(pa), Some(pb)) => pa < pb,
            _ => false,
        },
    })
}

fn count_support(windows: &[StreamWindow], fact_set: &FactSet) -> u32 {
    windows.iter().filter(|w| supports(w, fact_set)).count() as u32
}

/// Group discovered fact sets into the published num-events-keyed map,
/// preserving discovery order within each level.
fn build_level_map(
    frequent: Vec<(FactSet, u32)>,
) -> Result<BTreeMap<usize, Vec<Episode>>, InvalidInputError> {
    let mut levels: BTreeMap<usize, Vec<Episode>> = BTreeMap::new();
    for (fact_set, support) in frequent {
        let mut episode = Episode::new();
        episode.add_facts(fact_set);
        episode.set_frequency(support)?;
        levels.entry(episode.num_events()).or_default().push(episode);
    }
    Ok(levels)
}
