//! Umbrella error for the analysis pipeline.

use epmine_core::{ConsistencyError, ErrorCode, InvalidInputError};

/// Any failure the pipeline can surface to its caller.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

impl ErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(e) => e.error_code(),
            Self::Consistency(e) => e.error_code(),
        }
    }
}
