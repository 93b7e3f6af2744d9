//! Error taxonomy for the mining core.
//!
//! `InvalidInputError` is a precondition violation and always surfaces to
//! the caller immediately; `ConsistencyError` is a data-quality warning
//! that is logged and survived. There are no retries anywhere in this
//! workspace: every failure is a programming or data-integrity defect, not
//! a transient condition.

/// Stable error code for cross-system reporting.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// A caller violated a precondition.
#[derive(Debug, thiserror::Error)]
pub enum InvalidInputError {
    #[error("empty {what} given where at least one entry is required")]
    EmptyCollection { what: &'static str },

    #[error("frequency threshold must be positive")]
    NonPositiveThreshold,

    #[error("episode frequency must be a positive value")]
    NonPositiveFrequency,

    #[error("query must contain at least one event fact")]
    EmptyQuery,

    #[error("proposal count must be positive")]
    NonPositiveProposalCount,

    #[error("raw fact must not be empty")]
    NullFact,

    #[error("malformed raw fact: {raw:?}")]
    MalformedFact { raw: String },

    #[error("invalid episode: {reason}")]
    InvalidEpisode { reason: String },
}

impl ErrorCode for InvalidInputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCollection { .. } => "INPUT_EMPTY_COLLECTION",
            Self::NonPositiveThreshold => "INPUT_NON_POSITIVE_THRESHOLD",
            Self::NonPositiveFrequency => "INPUT_NON_POSITIVE_FREQUENCY",
            Self::EmptyQuery => "INPUT_EMPTY_QUERY",
            Self::NonPositiveProposalCount => "INPUT_NON_POSITIVE_PROPOSAL_COUNT",
            Self::NullFact => "INPUT_NULL_FACT",
            Self::MalformedFact { .. } => "INPUT_MALFORMED_FACT",
            Self::InvalidEpisode { .. } => "INPUT_INVALID_EPISODE",
        }
    }
}

/// Upstream data violated an invariant the pipeline assumes. Logged and
/// survived: the first-seen entry is kept.
#[derive(Debug, thiserror::Error)]
pub enum ConsistencyError {
    #[error(
        "duplicate fact set [{rendering}] with conflicting frequencies {first} and {second}"
    )]
    DuplicateFactSet { rendering: String, first: u32, second: u32 },
}

impl ErrorCode for ConsistencyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateFactSet { .. } => "DATA_DUPLICATE_FACT_SET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            InvalidInputError::EmptyQuery.error_code(),
            "INPUT_EMPTY_QUERY"
        );
        let err = ConsistencyError::DuplicateFactSet {
            rendering: "1,2".to_string(),
            first: 3,
            second: 4,
        };
        assert_eq!(err.error_code(), "DATA_DUPLICATE_FACT_SET");
        assert!(err.to_string().contains("conflicting frequencies 3 and 4"));
    }
}
