//! Error types for flag construction and mutation.

use crate::validation::{MAX_DESCRIPTION_LENGTH, MAX_KEY_LENGTH, MAX_ROLLOUT, MIN_ROLLOUT};
use thiserror::Error;

/// Result type for flag operations.
pub type FlagResult<T> = Result<T, FlagError>;

/// Validation failures, one per guarded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlagError {
    /// Rollout outside the inclusive percentage range
    #[error("rollout must be between {min} and {max}", min = MIN_ROLLOUT, max = MAX_ROLLOUT)]
    InvalidRollout,

    /// Key longer than the allowed number of characters
    #[error("key must be maximum {max} characters long", max = MAX_KEY_LENGTH)]
    InvalidKey,

    /// Description longer than the allowed number of characters
    #[error("description must be maximum {max} characters long", max = MAX_DESCRIPTION_LENGTH)]
    InvalidDescription,
}
