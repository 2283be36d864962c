//! Rule vocabulary: target matchers, compiled specs, recorded candidates.

use std::sync::Mutex;

use smallvec::SmallVec;

use rewind_core::types::{OperationKind, Severity, SourceSpan, SymbolId, TargetRef};

/// Target pattern for one rule: a container type plus the member names
/// that count.
///
/// An operation with no member part (an object creation) matches on the
/// container alone. An empty `members` list matches every member of the
/// container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMatcher {
    pub container: String,
    pub members: Vec<String>,
}

impl TargetMatcher {
    pub fn new(container: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            container: container.into(),
            members,
        }
    }

    pub fn matches(&self, target: &TargetRef) -> bool {
        if self.container != target.container {
            return false;
        }
        if target.member.is_empty() {
            return true;
        }
        self.members.is_empty() || self.members.iter().any(|m| m == &target.member)
    }
}

/// One detection rule in runtime form.
///
/// Rules are data consumed by a single generic matching loop; adding a
/// rule never touches the traversal or reachability machinery.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    /// Operation kinds this rule subscribes to.
    pub kinds: SmallVec<[OperationKind; 2]>,
    pub matcher: TargetMatcher,
    /// Catalog text shown in rule listings.
    pub description: String,
    /// Presentation template; `{member}` stands for the finding's first
    /// argument.
    pub message: String,
}

impl RuleSpec {
    pub fn subscribes_to(&self, kind: OperationKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Render the message template against a finding's arguments.
    pub fn render_message(&self, arguments: &[String]) -> String {
        match arguments.first() {
            Some(member) => self.message.replace("{member}", member),
            None => self.message.clone(),
        }
    }
}

/// A matched operation awaiting reconciliation: where it sits and which
/// declared symbol textually contains it.
///
/// Candidates are recorded program-wide, with no reachability knowledge;
/// whether one becomes a finding is decided only at reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCandidate {
    pub containing_symbol: SymbolId,
    pub span: SourceSpan,
    pub arguments: SmallVec<[String; 2]>,
}

/// Concurrent append-only candidate collection, one per rule. Filled by
/// parallel walkers, drained exactly once by the reconciler.
#[derive(Debug, Default)]
pub struct CandidateSet {
    candidates: Mutex<Vec<UsageCandidate>>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, candidate: UsageCandidate) {
        // A poisoned lock means a sibling worker already panicked and the
        // pass is unwinding; nothing left to record into.
        if let Ok(mut list) = self.candidates.lock() {
            list.push(candidate);
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.lock().map(|list| list.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<UsageCandidate> {
        self.candidates
            .lock()
            .map(|mut list| std::mem::take(&mut *list))
            .unwrap_or_default()
    }
}
