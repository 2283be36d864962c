//! Marker-driven entry scan feeding the reachability closure.

use tracing::{debug, warn};

use rewind_core::errors::{InvariantError, PassError, ResolverError};
use rewind_core::types::DeclarationId;
use rewind_core::{CancellationToken, SemanticModel};

use crate::reachability::{CallGraphExplorer, ReachabilitySet};

/// Scans every declaration for the entry marker, registers each match as
/// a reachability root, then explores the call closure of every root.
///
/// Registration of all roots completes before any exploration descends
/// into callees. The duplicate-entry fault therefore fires only when two
/// marked declarations resolve to one symbol, never because one entry
/// happens to call another: by the time closures run, every entry symbol
/// already owns its slot, and the explorer's losing insert on it is the
/// ordinary cycle-breaking path.
pub struct EntryPointScanner<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    marker: &'a str,
    token: &'a CancellationToken,
}

impl<'a, M: SemanticModel + ?Sized> EntryPointScanner<'a, M> {
    pub fn new(model: &'a M, marker: &'a str, token: &'a CancellationToken) -> Self {
        Self {
            model,
            marker,
            token,
        }
    }

    /// Run the scan. Returns the number of entry points registered.
    ///
    /// A second marked declaration for an already-registered entry symbol
    /// is an invariant fault that aborts the pass: entry identity is
    /// per-symbol, and two markings of one symbol mean the front-end
    /// produced an inconsistent snapshot.
    pub fn scan(&self, reachable: &ReachabilitySet) -> Result<usize, PassError> {
        let mut roots: Vec<DeclarationId> = Vec::new();
        for &declaration in self.model.declarations() {
            if self.token.is_cancelled() {
                return Err(PassError::Cancelled);
            }
            if !self.is_entry(declaration)? {
                continue;
            }
            let symbol = self.model.symbol_of(declaration);
            if !reachable.insert_if_absent(symbol, declaration) {
                let fault = InvariantError::DuplicateEntry {
                    symbol: self.model.symbol_name(symbol).to_string(),
                    span: self.model.declaration_span(declaration).clone(),
                };
                return Err(fault.into());
            }
            debug!(entry = %self.model.symbol_name(symbol), "entry point registered");
            roots.push(declaration);
        }

        let explorer = CallGraphExplorer::new(self.model, reachable);
        for &root in &roots {
            if self.token.is_cancelled() {
                return Err(PassError::Cancelled);
            }
            // The marker may sit on one site of a partial symbol; calls
            // made from its other sites count all the same.
            let symbol = self.model.symbol_of(root);
            let sites = self.model.declarations_of(symbol)?;
            if sites.is_empty() {
                warn!(
                    entry = %self.model.symbol_name(symbol),
                    "entry symbol reports no declaration sites"
                );
            }
            for &site in sites {
                explorer.explore(site)?;
            }
        }
        Ok(roots.len())
    }

    /// The marker counts wherever it is attached: on the declaration
    /// itself or on any of its parameters.
    fn is_entry(&self, declaration: DeclarationId) -> Result<bool, ResolverError> {
        Ok(self.model.declaration_has_marker(declaration, self.marker)?
            || self.model.parameter_has_marker(declaration, self.marker)?)
    }
}
