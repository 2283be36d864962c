//! Semantic resolution interface supplied by the front-end.

use crate::errors::ResolverError;
use crate::types::{CallSiteId, DeclarationId, Operation, OperationId, SourceSpan, SymbolId};

/// Semantic services the engine consumes but never implements: mapping
/// declarations to symbols, resolving call targets, classifying operations.
///
/// An implementation is an immutable snapshot of one program for the
/// duration of a pass and must be shareable across scanning threads.
///
/// Syntactic accessors (arena enumeration and lookup by id) are infallible:
/// the snapshot is already materialized. Semantic queries return
/// `ResolverError` when the underlying resolution service fails; an
/// *unresolvable* call target is `Ok(None)`, not an error.
pub trait SemanticModel: Send + Sync {
    /// Every declaration node in the program, in source order.
    fn declarations(&self) -> &[DeclarationId];

    /// The symbol a declaration belongs to. Multi-site (partial) definitions
    /// share one symbol.
    fn symbol_of(&self, declaration: DeclarationId) -> SymbolId;

    /// All declaration sites of a symbol — several for partial definitions,
    /// empty for symbols without source.
    fn declarations_of(&self, symbol: SymbolId) -> Result<&[DeclarationId], ResolverError>;

    /// Call expressions lexically inside a declaration's body, including
    /// those nested in lambdas and local functions.
    fn calls_in(&self, declaration: DeclarationId) -> Result<&[CallSiteId], ResolverError>;

    /// Statically resolved target of a call expression. `None` for targets
    /// that are dynamic, unresolved, or have no source.
    fn resolve_callee(&self, call: CallSiteId) -> Result<Option<SymbolId>, ResolverError>;

    /// Whether the declaration itself carries the marker annotation.
    fn declaration_has_marker(
        &self,
        declaration: DeclarationId,
        marker: &str,
    ) -> Result<bool, ResolverError>;

    /// Whether any parameter of the declaration carries the marker
    /// annotation.
    fn parameter_has_marker(
        &self,
        declaration: DeclarationId,
        marker: &str,
    ) -> Result<bool, ResolverError>;

    /// Every operation site in the program. Finite, re-iterable.
    fn operations(&self) -> &[OperationId];

    /// Payload of an operation site: kind, target reference, location.
    fn operation(&self, operation: OperationId) -> &Operation;

    /// Innermost *declared* callable containing an operation. Operations
    /// inside lambdas, closures, and local functions report the lexically
    /// enclosing declared function.
    fn enclosing_symbol(&self, operation: OperationId) -> Result<SymbolId, ResolverError>;

    /// Source location of a declaration.
    fn declaration_span(&self, declaration: DeclarationId) -> &SourceSpan;

    /// Display name of a symbol, for logs and fault messages only. Never
    /// used for identity.
    fn symbol_name(&self, symbol: SymbolId) -> &str;
}
