//! Internal consistency faults.

use super::error_code::{self, RewindErrorCode};
use crate::types::SourceSpan;

/// Violations of engine invariants. These indicate a bug in the engine or
/// an inconsistent front-end, never a user code problem, and must never
/// surface as a finding.
#[derive(Debug, thiserror::Error)]
pub enum InvariantError {
    #[error("Entry symbol `{symbol}` registered twice; second site at {span}")]
    DuplicateEntry { symbol: String, span: SourceSpan },
}

impl RewindErrorCode for InvariantError {
    fn error_code(&self) -> &'static str {
        error_code::INVARIANT_ERROR
    }
}
