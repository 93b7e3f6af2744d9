//! Episodes: fact sets with a support frequency, and recommendation queries.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInputError;
use crate::types::facts::Fact;

/// A set of co-occurring/ordered facts with a window-support frequency.
///
/// Facts are unique by equality and kept in canonical order (events first,
/// then relations). The frequency is set once by the miner; episodes stored
/// in the final episode database are treated as immutable values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    facts: BTreeSet<Fact>,
    frequency: u32,
}

impl Episode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an episode from textual facts, leaving the frequency at zero.
    pub fn from_raw_facts<S: AsRef<str>>(raws: &[S]) -> Result<Self, InvalidInputError> {
        let mut episode = Self::new();
        for raw in raws {
            episode.add_raw(raw.as_ref())?;
        }
        Ok(episode)
    }

    pub fn add_fact(&mut self, fact: Fact) {
        self.facts.insert(fact);
    }

    pub fn add_raw(&mut self, raw: &str) -> Result<(), InvalidInputError> {
        self.add_fact(Fact::parse(raw)?);
        Ok(())
    }

    pub fn add_facts<I: IntoIterator<Item = Fact>>(&mut self, facts: I) {
        for fact in facts {
            self.add_fact(fact);
        }
    }

    /// Set the support frequency. Zero is rejected: a finalized episode is
    /// backed by at least one supporting window.
    pub fn set_frequency(&mut self, frequency: u32) -> Result<(), InvalidInputError> {
        if frequency == 0 {
            return Err(InvalidInputError::NonPositiveFrequency);
        }
        self.frequency = frequency;
        Ok(())
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn contains_fact(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn num_facts(&self) -> usize {
        self.facts.len()
    }

    /// Count of plain-event facts; relations are not counted in size.
    pub fn num_events(&self) -> usize {
        self.facts.iter().filter(|f| !f.is_relation()).count()
    }

    /// The ids of all plain-event facts, in ascending order.
    pub fn event_ids(&self) -> BTreeSet<u32> {
        self.facts.iter().filter_map(Fact::event_id).collect()
    }

    pub fn relations(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.facts.iter().filter_map(Fact::relation_ids)
    }

    /// Fact-subset test: true iff every fact of `self` is contained in
    /// `other`.
    pub fn is_subepisode_of(&self, other: &Episode) -> bool {
        self.facts.is_subset(&other.facts)
    }

    /// Structural validity: relations may only reference plain-event facts
    /// of the same episode, and an episode with relations but no events is
    /// invalid.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let events = self.event_ids();
        if events.is_empty() && !self.facts.is_empty() {
            return Err(InvalidInputError::InvalidEpisode {
                reason: "episode holds only relation facts".to_string(),
            });
        }
        for (first, second) in self.relations() {
            if !events.contains(&first) || !events.contains(&second) {
                return Err(InvalidInputError::InvalidEpisode {
                    reason: format!("relation {first}>{second} references a missing event"),
                });
            }
        }
        Ok(())
    }

    /// Canonical rendering: facts joined by `,` in canonical order.
    pub fn rendering(&self) -> String {
        let raws: Vec<String> = self.facts.iter().map(Fact::raw).collect();
        raws.join(",")
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:{}", self.rendering(), self.frequency)
    }
}

/// An episode-shaped partial observation submitted at recommendation time:
/// a growing fact set without a frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    facts: BTreeSet<Fact>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw_facts<S: AsRef<str>>(raws: &[S]) -> Result<Self, InvalidInputError> {
        let mut query = Self::new();
        for raw in raws {
            query.add_raw(raw.as_ref())?;
        }
        Ok(query)
    }

    pub fn add_fact(&mut self, fact: Fact) {
        self.facts.insert(fact);
    }

    pub fn add_raw(&mut self, raw: &str) -> Result<(), InvalidInputError> {
        self.add_fact(Fact::parse(raw)?);
        Ok(())
    }

    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn num_events(&self) -> usize {
        self.facts.iter().filter(|f| !f.is_relation()).count()
    }

    pub fn event_ids(&self) -> BTreeSet<u32> {
        self.facts.iter().filter_map(Fact::event_id).collect()
    }

    pub fn relations(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.facts.iter().filter_map(Fact::relation_ids)
    }
}
