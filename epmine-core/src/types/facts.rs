//! Atomic observations inside an episode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInputError;

/// A single atomic observation: either one event reference or an ordered
/// precedence relation between two event references.
///
/// The textual rendering is `"i"` for events and `"i>j"` for relations.
/// The derived ordering puts event facts before relation facts, then sorts
/// numerically, which gives episodes a canonical rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fact {
    /// Reference to the event with this mapping id.
    Event(u32),
    /// `Relation(i, j)` states that `i` precedes `j`.
    Relation(u32, u32),
}

impl Fact {
    pub fn event(id: u32) -> Self {
        Self::Event(id)
    }

    pub fn relation(first: u32, second: u32) -> Self {
        Self::Relation(first, second)
    }

    /// Parse the textual rendering. An empty raw fact is rejected, as is
    /// anything that is not a decimal id or an `i>j` pair.
    pub fn parse(raw: &str) -> Result<Self, InvalidInputError> {
        if raw.is_empty() {
            return Err(InvalidInputError::NullFact);
        }
        if let Some((first, second)) = raw.split_once('>') {
            let first = first
                .parse::<u32>()
                .map_err(|_| InvalidInputError::MalformedFact { raw: raw.to_string() })?;
            let second = second
                .parse::<u32>()
                .map_err(|_| InvalidInputError::MalformedFact { raw: raw.to_string() })?;
            return Ok(Self::Relation(first, second));
        }
        raw.parse::<u32>()
            .map(Self::Event)
            .map_err(|_| InvalidInputError::MalformedFact { raw: raw.to_string() })
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(..))
    }

    /// The event id of a plain fact, `None` for relations.
    pub fn event_id(&self) -> Option<u32> {
        match self {
            Self::Event(id) => Some(*id),
            Self::Relation(..) => None,
        }
    }

    /// The `(first, second)` pair of a relation fact, `None` for events.
    pub fn relation_ids(&self) -> Option<(u32, u32)> {
        match self {
            Self::Event(_) => None,
            Self::Relation(first, second) => Some((*first, *second)),
        }
    }

    pub fn raw(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(id) => write!(f, "{id}"),
            Self::Relation(first, second) => write!(f, "{first}>{second}"),
        }
    }
}
