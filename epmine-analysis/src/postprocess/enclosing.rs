//! Enclosing-methods index: which source methods exhibit an episode.

use std::collections::BTreeSet;

use epmine_core::{Episode, Event, Fact, FxHashMap, MethodId};

/// Records, per learned episode, the source methods in which it was
/// observed and how often.
///
/// In the default mode a method occurrence counts iff the episode's
/// plain-event facts appear anywhere in the method's fact sequence as a
/// sub-multiset; the per-call count is the number of disjoint embeddings
/// (the minimum multiplicity over the episode's events). Order-sensitive
/// mode additionally requires every precedence relation to hold by first
/// occurrence; a violated relation makes the call a no-op.
#[derive(Debug, Clone)]
pub struct EnclosingMethods {
    order_sensitive: bool,
    occurrences: u32,
    methods: FxHashMap<MethodId, u32>,
}

impl EnclosingMethods {
    pub fn new(order_sensitive: bool) -> Self {
        Self {
            order_sensitive,
            occurrences: 0,
            methods: FxHashMap::default(),
        }
    }

    pub fn order_sensitive(&self) -> bool {
        self.order_sensitive
    }

    /// Record one observed method body. Non-matching calls are no-ops; the
    /// occurrence counter only ever grows.
    pub fn add_method(&mut self, episode: &Episode, method_facts: &[Fact], source: &Event) {
        let count = self.match_count(episode, method_facts);
        if count == 0 {
            return;
        }
        self.occurrences += count;
        *self.methods.entry(source.method().clone()).or_insert(0) += count;
    }

    /// Total matched occurrences across all recorded methods.
    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }

    /// Source methods whose individual occurrence count reaches
    /// `min_occurrences` — prunes noisy single-method matches.
    pub fn method_names(&self, min_occurrences: u32) -> BTreeSet<MethodId> {
        self.methods
            .iter()
            .filter(|(_, &count)| count >= min_occurrences)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn match_count(&self, episode: &Episode, method_facts: &[Fact]) -> u32 {
        let events = episode.event_ids();
        if events.is_empty() {
            return 0;
        }

        let mut embeddings = u32::MAX;
        for &id in &events {
            let multiplicity = method_facts
                .iter()
                .filter(|fact| fact.event_id() == Some(id))
                .count() as u32;
            if multiplicity == 0 {
                return 0;
            }
            embeddings = embeddings.min(multiplicity);
        }

        if self.order_sensitive {
            for (first, second) in episode.relations() {
                let pos_first = first_position(method_facts, first);
                let pos_second = first_position(method_facts, second);
                match (pos_first, pos_second) {
                    (Some(a), Some(b)) if a < b => {}
                    _ => return 0,
                }
            }
        }

        embeddings
    }
}

fn first_position(method_facts: &[Fact], id: u32) -> Option<usize> {
    method_facts.iter().position(|fact| fact.event_id() == Some(id))
}

// Equality covers the observable index state: the occurrence counter and
// the recorded per-method counts.
impl PartialEq for EnclosingMethods {
    fn eq(&self, other: &Self) -> bool {
        self.occurrences == other.occurrences && self.methods == other.methods
    }
}

impl Eq for EnclosingMethods {}
