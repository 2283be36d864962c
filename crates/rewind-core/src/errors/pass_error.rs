//! Pass-level errors.

use super::error_code::{self, RewindErrorCode};
use super::{InvariantError, ResolverError, RuleError};

/// Errors that abort an analysis pass.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantError),

    #[error("Pass cancelled")]
    Cancelled,
}

impl RewindErrorCode for PassError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Resolver(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Invariant(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
