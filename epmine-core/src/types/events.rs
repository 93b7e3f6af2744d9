//! Observed code actions and their identity keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved method identifier carried by unknown events and unresolved
/// context markers.
pub const UNKNOWN_METHOD: &str = "-unknown-";

/// Reserved method identifier carried by the dummy mapping placeholder.
pub const DUMMY_METHOD: &str = "-dummy-";

/// What kind of code action an [`Event`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A method invocation inside a method body.
    Invocation,
    /// Entry marker of the first declaration in an override hierarchy.
    /// Opens a new window in the filtered stream.
    FirstContext,
    /// A call to the super implementation of the enclosing method.
    SuperContext,
    /// Marker naming the method whose body is being recorded. Provenance
    /// only, never mined.
    EnclosingContext,
    /// An action whose target could not be resolved.
    Unknown,
    /// Placeholder occupying mapping id 0.
    Dummy,
}

impl EventKind {
    /// Stable single-token tag used in the mapping file encoding.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Invocation => "INV",
            Self::FirstContext => "FCTX",
            Self::SuperContext => "SCTX",
            Self::EnclosingContext => "ECTX",
            Self::Unknown => "UNK",
            Self::Dummy => "DUM",
        }
    }

    /// Inverse of [`EventKind::tag`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "INV" => Some(Self::Invocation),
            "FCTX" => Some(Self::FirstContext),
            "SCTX" => Some(Self::SuperContext),
            "ECTX" => Some(Self::EnclosingContext),
            "UNK" => Some(Self::Unknown),
            "DUM" => Some(Self::Dummy),
            _ => None,
        }
    }
}

/// Opaque identifier of a method, as produced by the external context
/// parser. Two events are equal iff kind and method identifier match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(String);

impl MethodId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_METHOD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the reserved sentinel identifiers.
    pub fn is_sentinel(&self) -> bool {
        self.0 == UNKNOWN_METHOD || self.0 == DUMMY_METHOD
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A single observed code action: immutable value with identity over
/// `(kind, method)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    method: MethodId,
}

impl Event {
    pub fn invocation(method: MethodId) -> Self {
        Self { kind: EventKind::Invocation, method }
    }

    pub fn first_context(method: MethodId) -> Self {
        Self { kind: EventKind::FirstContext, method }
    }

    pub fn super_context(method: MethodId) -> Self {
        Self { kind: EventKind::SuperContext, method }
    }

    pub fn enclosing_context(method: MethodId) -> Self {
        Self { kind: EventKind::EnclosingContext, method }
    }

    pub fn unknown() -> Self {
        Self { kind: EventKind::Unknown, method: MethodId::unknown() }
    }

    pub fn dummy() -> Self {
        Self { kind: EventKind::Dummy, method: MethodId::new(DUMMY_METHOD) }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn method(&self) -> &MethodId {
        &self.method
    }

    /// Sentinel events carry a reserved method identifier and are never
    /// counted for frequency purposes or given a real mapping id.
    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, EventKind::Unknown | EventKind::Dummy) || self.method.is_sentinel()
    }

    /// Single-line encoding used by the mapping file: `<TAG> <method>`.
    pub fn encode(&self) -> String {
        format!("{} {}", self.kind.tag(), self.method)
    }

    /// Inverse of [`Event::encode`]. Returns `None` on malformed input.
    pub fn decode(line: &str) -> Option<Self> {
        let (tag, method) = line.split_once(' ')?;
        let kind = EventKind::from_tag(tag)?;
        Some(Self { kind, method: MethodId::new(method) })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.tag(), self.method)
    }
}
