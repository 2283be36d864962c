//! Transitive call-closure exploration from registered roots.

use rewind_core::errors::ResolverError;
use rewind_core::types::DeclarationId;
use rewind_core::SemanticModel;

use super::set::ReachabilitySet;

/// Depth-first walk over call expressions, descending into a callee only
/// when its reachability insert wins.
///
/// The insert happens before any recursion into the callee, so direct
/// recursion, mutual recursion, and diamond call shapes all terminate on
/// the same check. Total work is bounded by the number of distinct
/// symbols plus the number of call sites, however the graph is shaped.
pub struct CallGraphExplorer<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    reachable: &'a ReachabilitySet,
}

impl<'a, M: SemanticModel + ?Sized> CallGraphExplorer<'a, M> {
    pub fn new(model: &'a M, reachable: &'a ReachabilitySet) -> Self {
        Self { model, reachable }
    }

    /// Visit every call expression in `declaration`'s body and descend
    /// into each callee claimed by this walk.
    ///
    /// A callee that cannot be resolved, or that has no declaration site
    /// in the program, is skipped without error: there is nothing to
    /// traverse into and nothing to record.
    pub fn explore(&self, declaration: DeclarationId) -> Result<(), ResolverError> {
        for &call in self.model.calls_in(declaration)? {
            let Some(callee) = self.model.resolve_callee(call)? else {
                continue;
            };
            let sites = self.model.declarations_of(callee)?;
            let Some(&first) = sites.first() else {
                continue;
            };
            if self.reachable.insert_if_absent(callee, first) {
                // This walk owns the symbol now. Descend into every
                // declaration site: a call made from any partial site
                // keeps its targets live.
                for &site in sites {
                    self.explore(site)?;
                }
            }
        }
        Ok(())
    }
}
