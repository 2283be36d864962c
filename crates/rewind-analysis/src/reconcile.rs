//! End-of-pass reconciliation: candidates crossed with reachability.

use tracing::debug;

use rewind_core::types::Finding;
use rewind_core::DiagnosticSink;

use crate::reachability::FrozenReachability;
use crate::rules::{RuleSpec, UsageCandidate};

/// Turns recorded candidates into findings.
///
/// Construction requires the frozen reachability view, which only exists
/// after every producer has joined; the type system thereby pins
/// reconciliation behind the barrier. A candidate produces a finding
/// exactly when its containing symbol was proven reachable.
pub struct Reconciler {
    reachable: FrozenReachability,
}

impl Reconciler {
    pub fn new(reachable: FrozenReachability) -> Self {
        Self { reachable }
    }

    pub fn reachable(&self) -> &FrozenReachability {
        &self.reachable
    }

    /// Emit findings for every reachable candidate into `sink`, consuming
    /// the reconciler. Returns the number of findings emitted.
    pub fn reconcile(
        self,
        rules: Vec<(RuleSpec, Vec<UsageCandidate>)>,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let mut emitted = 0;
        for (rule, candidates) in rules {
            for candidate in candidates {
                if !self.reachable.contains(candidate.containing_symbol) {
                    continue;
                }
                sink.report(Finding {
                    rule_id: rule.id.clone(),
                    severity: rule.severity,
                    location: candidate.span,
                    arguments: candidate.arguments,
                });
                emitted += 1;
            }
        }
        debug!(findings = emitted, "reconciliation complete");
        emitted
    }
}
