//! The generic matching loop feeding operation sites through every rule.

use smallvec::smallvec;

use rewind_core::errors::ResolverError;
use rewind_core::types::OperationId;
use rewind_core::SemanticModel;

use super::registry::RuleRegistry;
use super::types::{CandidateSet, RuleSpec, UsageCandidate};

/// One pass's worth of rule observers: the compiled registry plus a
/// concurrent candidate collection per rule, index-aligned.
///
/// `observe` takes `&self` only, so parallel walkers share one set.
/// Observers never consult reachability; every match program-wide is
/// recorded, and reconciliation decides which matches become findings.
pub struct ObserverSet<'r> {
    registry: &'r RuleRegistry,
    candidates: Vec<CandidateSet>,
}

impl<'r> ObserverSet<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        let candidates = registry.rules().iter().map(|_| CandidateSet::new()).collect();
        Self {
            registry,
            candidates,
        }
    }

    /// Feed one operation site through every rule subscribed to its kind.
    ///
    /// The containing symbol is resolved only once some rule has matched;
    /// non-matching operations never pay for a semantic query.
    pub fn observe<M: SemanticModel + ?Sized>(
        &self,
        model: &M,
        operation: OperationId,
    ) -> Result<(), ResolverError> {
        let op = model.operation(operation);
        for &index in self.registry.candidates_for(&op.target.container) {
            let rule = self.registry.rule(index);
            if !rule.subscribes_to(op.kind) || !rule.matcher.matches(&op.target) {
                continue;
            }
            let containing = model.enclosing_symbol(operation)?;
            self.candidates[index].record(UsageCandidate {
                containing_symbol: containing,
                span: op.span.clone(),
                arguments: smallvec![op.target.qualified_name()],
            });
        }
        Ok(())
    }

    pub fn rules(&self) -> &[RuleSpec] {
        self.registry.rules()
    }

    /// Total candidates recorded across all rules.
    pub fn candidate_count(&self) -> usize {
        self.candidates.iter().map(CandidateSet::len).sum()
    }

    /// Drain every rule's candidates for reconciliation, paired with the
    /// rule that recorded them.
    pub fn drain(self) -> Vec<(RuleSpec, Vec<UsageCandidate>)> {
        self.registry
            .rules()
            .iter()
            .cloned()
            .zip(self.candidates.iter().map(CandidateSet::take))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rewind_core::types::{OperationKind, SourceSpan, TargetRef};

    use crate::model::ProgramModel;
    use crate::rules::registry::{builtin_rules, RuleRegistry};

    use super::*;

    #[test]
    fn match_records_candidate_with_qualified_name() {
        let mut model = ProgramModel::new();
        let helper = model.add_symbol("App.Helper");
        model.add_declaration(helper, SourceSpan::new("helper.cs", 1, 1));
        let op = model.add_operation(
            helper,
            OperationKind::MemberAccess,
            TargetRef::new("System.DateTime", "Now"),
            SourceSpan::new("helper.cs", 4, 17),
        );

        let registry = RuleRegistry::from_rules(builtin_rules());
        let observers = ObserverSet::new(&registry);
        observers.observe(&model, op).unwrap();

        assert_eq!(observers.candidate_count(), 1);
        let drained = observers.drain();
        let (rule, candidates) = drained
            .into_iter()
            .find(|(_, candidates)| !candidates.is_empty())
            .unwrap();
        assert_eq!(rule.id, "RW1101");
        assert_eq!(candidates[0].containing_symbol, helper);
        assert_eq!(candidates[0].arguments[0], "System.DateTime.Now");
    }

    #[test]
    fn kind_subscription_gates_matching() {
        let mut model = ProgramModel::new();
        let helper = model.add_symbol("App.Helper");
        model.add_declaration(helper, SourceSpan::new("helper.cs", 1, 1));
        // Reading `Guid.NewGuid` as a method group is not an invocation.
        let op = model.add_operation(
            helper,
            OperationKind::MemberAccess,
            TargetRef::new("System.Guid", "NewGuid"),
            SourceSpan::new("helper.cs", 9, 5),
        );

        let registry = RuleRegistry::from_rules(builtin_rules());
        let observers = ObserverSet::new(&registry);
        observers.observe(&model, op).unwrap();

        assert_eq!(observers.candidate_count(), 0);
    }

    #[test]
    fn non_matching_operation_skips_semantic_queries() {
        let mut model = ProgramModel::new();
        let helper = model.add_symbol("App.Helper");
        model.add_declaration(helper, SourceSpan::new("helper.cs", 1, 1));
        let op = model.add_operation(
            helper,
            OperationKind::Invocation,
            TargetRef::new("System.Console", "WriteLine"),
            SourceSpan::new("helper.cs", 2, 5),
        );
        model.poison_resolver("no symbol queries expected");

        let registry = RuleRegistry::from_rules(builtin_rules());
        let observers = ObserverSet::new(&registry);
        // A poisoned resolver would fail the enclosing-symbol query, so a
        // clean pass proves the loop never got that far.
        observers.observe(&model, op).unwrap();
        assert_eq!(observers.candidate_count(), 0);
    }
}
