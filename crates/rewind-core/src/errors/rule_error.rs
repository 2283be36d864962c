//! Rule definition errors.

use super::error_code::{self, RewindErrorCode};

/// Errors raised while compiling rule definitions into the registry.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid rule definition `{id}`: {message}")]
    InvalidDefinition { id: String, message: String },

    #[error("Unknown operation kind `{kind}` in rule `{id}`")]
    UnknownKind { id: String, kind: String },

    #[error("Duplicate rule id `{0}`")]
    DuplicateId(String),

    #[error("Unknown rule id `{0}` in enable/disable list")]
    UnknownRuleId(String),
}

impl RewindErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
