//! Semantic resolver errors.

use super::error_code::{self, RewindErrorCode};

/// Infrastructure failures raised by `SemanticModel` implementations.
///
/// These are pass-fatal: the engine does not retry. An *unresolvable* call
/// target is not an error — resolvers report it as `Ok(None)` and traversal
/// simply does not descend through it.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("Semantic service unavailable: {0}")]
    Unavailable(String),

    #[error("Resolution timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Inconsistent model data: {0}")]
    Inconsistent(String),
}

impl RewindErrorCode for ResolverError {
    fn error_code(&self) -> &'static str {
        error_code::RESOLVER_ERROR
    }
}
