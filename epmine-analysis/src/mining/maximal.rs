//! Maximal-episode reduction: drop episodes subsumed at a higher level.

use std::collections::BTreeMap;

use tracing::warn;

use epmine_core::{ConsistencyError, Episode, ErrorCode, FxHashMap, InvalidInputError};

/// Remove every episode whose fact set is contained in some episode at a
/// strictly higher level. Frequency plays no role in subsumption.
///
/// A duplicate fact set with a conflicting frequency cannot be produced by
/// the miner; if one is encountered, it is logged as a consistency warning
/// and the first-seen entry is kept.
pub fn reduce(
    episodes: &BTreeMap<usize, Vec<Episode>>,
) -> Result<BTreeMap<usize, Vec<Episode>>, InvalidInputError> {
    if episodes.is_empty() {
        return Err(InvalidInputError::EmptyCollection { what: "episode level map" });
    }

    let mut reduced: BTreeMap<usize, Vec<Episode>> = BTreeMap::new();
    let mut seen: FxHashMap<String, u32> = FxHashMap::default();

    for (&level, list) in episodes {
        let mut survivors: Vec<Episode> = Vec::new();
        for episode in list {
            if let Some(&first) = seen.get(&episode.rendering()) {
                if first != episode.frequency() {
                    let err = ConsistencyError::DuplicateFactSet {
                        rendering: episode.rendering(),
                        first,
                        second: episode.frequency(),
                    };
                    warn!(code = err.error_code(), "{err}");
                }
                continue;
            }
            seen.insert(episode.rendering(), episode.frequency());

            if !is_subsumed(episode, level, episodes) {
                survivors.push(episode.clone());
            }
        }
        if !survivors.is_empty() {
            reduced.insert(level, survivors);
        }
    }

    Ok(reduced)
}

fn is_subsumed(
    episode: &Episode,
    level: usize,
    episodes: &BTreeMap<usize, Vec<Episode>>,
) -> bool {
    episodes
        .range(level + 1..)
        .any(|(_, larger)| larger.iter().any(|f| episode.is_subepisode_of(f)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(frequency: u32, raws: &[&str]) -> Episode {
        let mut e = Episode::from_raw_facts(raws).unwrap();
        e.set_frequency(frequency).unwrap();
        e
    }

    fn level_map(levels: &[(usize, Vec<Episode>)]) -> BTreeMap<usize, Vec<Episode>> {
        levels.iter().cloned().collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(reduce(&BTreeMap::new()).is_err());
    }

    #[test]
    fn disjoint_episodes_at_one_level_all_survive() {
        let input = level_map(&[(
            2,
            vec![
                episode(3, &["1", "2", "1>2"]),
                episode(4, &["1", "3", "1>3"]),
                episode(2, &["2", "3", "2>3"]),
            ],
        )]);

        assert_eq!(reduce(&input).unwrap(), input);
    }

    #[test]
    fn singletons_covered_by_larger_episodes_are_removed() {
        let input = level_map(&[
            (1, vec![episode(3, &["1"]), episode(3, &["2"]), episode(3, &["3"])]),
            (2, vec![episode(3, &["1", "2", "1>2"]), episode(4, &["1", "3", "1>3"])]),
        ]);

        let reduced = reduce(&input).unwrap();
        // Every singleton is contained in one of the level-2 episodes.
        assert!(!reduced.contains_key(&1));
        assert_eq!(reduced[&2], input[&2]);
    }

    #[test]
    fn uncovered_singleton_survives() {
        let input = level_map(&[
            (1, vec![episode(3, &["1"]), episode(3, &["2"]), episode(3, &["3"])]),
            (2, vec![episode(3, &["1", "2", "1>2"])]),
        ]);

        let reduced = reduce(&input).unwrap();
        assert_eq!(reduced[&1], vec![episode(3, &["3"])]);
        assert_eq!(reduced[&2], input[&2]);
    }

    #[test]
    fn lower_support_still_subsumes() {
        // Subsumption is about fact containment, not frequency.
        let input = level_map(&[
            (1, vec![episode(3, &["1"]), episode(3, &["2"]), episode(3, &["3"])]),
            (2, vec![episode(2, &["2", "3", "2>3"])]),
        ]);

        let reduced = reduce(&input).unwrap();
        assert_eq!(reduced[&1], vec![episode(3, &["1"])]);
    }

    #[test]
    fn conflicting_duplicate_keeps_the_first_entry() {
        let input = level_map(&[(
            2,
            vec![episode(3, &["1", "2"]), episode(5, &["1", "2"])],
        )]);

        let reduced = reduce(&input).unwrap();
        assert_eq!(reduced[&2], vec![episode(3, &["1", "2"])]);
    }

    #[test]
    fn output_is_maximal() {
        let input = level_map(&[
            (1, vec![episode(3, &["1"])]),
            (2, vec![episode(3, &["1", "2", "1>2"])]),
            (3, vec![episode(2, &["1", "2", "3", "1>2"])]),
        ]);

        let reduced = reduce(&input).unwrap();
        let all: Vec<&Episode> = reduced.values().flatten().collect();
        for a in &all {
            for b in &all {
                assert!(
                    std::ptr::eq(*a, *b) || !a.is_subepisode_of(b) || a.num_events() == b.num_events(),
                    "{a} is subsumed by {b}"
                );
            }
        }
        assert!(!reduced.contains_key(&1));
        assert!(!reduced.contains_key(&2));
    }
}
