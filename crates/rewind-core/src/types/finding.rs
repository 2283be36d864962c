//! Findings: the externally visible result of an analysis pass.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::span::SourceSpan;

/// Severity attached to a rule and inherited by its findings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reported violation: a rule match proven reachable from an entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier, e.g. `RW1101`.
    pub rule_id: String,
    pub severity: Severity,
    /// Location of the matched operation site.
    pub location: SourceSpan,
    /// Ordered message arguments; the first is the fully qualified matched
    /// member name.
    pub arguments: SmallVec<[String; 2]>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] at {}: {}",
            self.rule_id,
            self.severity,
            self.location,
            self.arguments.join(", ")
        )
    }
}
