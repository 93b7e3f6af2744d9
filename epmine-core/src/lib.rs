//! # epmine-core
//!
//! Foundation crate for the epmine episode-mining engine.
//! Defines the event/fact/episode data model, the filtered event-stream
//! encoding, configuration, errors, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod trace;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{MiningConfig, TieBreak};
pub use errors::{ConsistencyError, ErrorCode, InvalidInputError};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::episodes::{Episode, Query};
pub use types::events::{Event, EventKind, MethodId};
pub use types::facts::Fact;
pub use types::stream::{EventStream, StreamWindow};
