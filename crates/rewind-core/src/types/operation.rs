//! Operation sites and their classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::span::SourceSpan;

/// Categories of program operations a rule can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Property or field access, e.g. `DateTime.Now`.
    MemberAccess,
    /// Method or function invocation, e.g. `Guid.NewGuid()`.
    Invocation,
    /// Constructor call, e.g. `new Random()`.
    ObjectCreation,
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemberAccess => "member_access",
            Self::Invocation => "invocation",
            Self::ObjectCreation => "object_creation",
        }
    }

    /// Parse the snake_case form used in rule definitions.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "member_access" => Some(Self::MemberAccess),
            "invocation" => Some(Self::Invocation),
            "object_creation" => Some(Self::ObjectCreation),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualified reference to the program construct an operation touches.
///
/// For member accesses and invocations, `container` is the declaring type's
/// qualified name and `member` the accessed member. For object creations,
/// `container` is the constructed type and `member` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub container: String,
    pub member: String,
}

impl TargetRef {
    pub fn new(container: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            member: member.into(),
        }
    }

    /// The fully qualified member name, e.g. `System.DateTime.Now`, or just
    /// the container when there is no member part.
    pub fn qualified_name(&self) -> String {
        if self.member.is_empty() {
            self.container.clone()
        } else {
            format!("{}.{}", self.container, self.member)
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// One operation site observed in the program snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub target: TargetRef,
    pub span: SourceSpan,
}
