//! Rule selection and data-described rule definitions.

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// Rule selection plus custom rules defined as configuration data.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule ids to enable. Empty enables every known rule.
    pub enabled: Vec<String>,
    /// Rule ids to disable. Applied after `enabled`.
    pub disabled: Vec<String>,
    /// Additional rules described as data, merged with the built-ins.
    pub custom: Vec<RuleDef>,
}

/// One rule described as data: which operation kinds to watch, which
/// container/member targets count as a match, and how to present it.
///
/// ```toml
/// [[rules.custom]]
/// id = "RW1201"
/// name = "stopwatch-timestamp"
/// kinds = ["invocation"]
/// container = "System.Diagnostics.Stopwatch"
/// members = ["GetTimestamp"]
/// severity = "warning"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Stable identifier, e.g. `RW1201`.
    pub id: String,
    /// Short kebab-case name.
    pub name: String,
    /// Operation kinds to subscribe to: `member_access`, `invocation`,
    /// `object_creation`.
    pub kinds: Vec<String>,
    /// Qualified container type, e.g. `System.DateTime`.
    pub container: String,
    /// Member names that match. Empty matches any member — used by
    /// object-creation rules, where the container alone identifies the
    /// target.
    #[serde(default)]
    pub members: Vec<String>,
    /// Severity of findings. Default: warning.
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Human-readable description of why the target is non-deterministic.
    #[serde(default)]
    pub description: String,
    /// Message template for the host's presentation layer; `{member}` is
    /// replaced with the first finding argument.
    #[serde(default)]
    pub message: String,
}
