//! In-memory program snapshot — the concrete `SemanticModel` front-ends populate.

use rewind_core::errors::ResolverError;
use rewind_core::types::{
    CallSiteId, DeclarationId, Operation, OperationId, OperationKind, SourceSpan, SymbolId,
    TargetRef,
};
use rewind_core::SemanticModel;

#[derive(Debug)]
struct SymbolData {
    name: String,
    declarations: Vec<DeclarationId>,
}

#[derive(Debug)]
struct DeclarationData {
    symbol: SymbolId,
    span: SourceSpan,
    /// Marker annotations on the declaration itself.
    markers: Vec<String>,
    /// Marker annotations on any of the declaration's parameters.
    parameter_markers: Vec<String>,
    calls: Vec<CallSiteId>,
}

#[derive(Debug)]
struct OperationData {
    operation: Operation,
    enclosing: SymbolId,
}

/// Arena-backed program snapshot.
///
/// A front-end registers symbols, their declaration sites, the call
/// expressions inside each body, and the operation sites rules inspect.
/// The engine then consumes the snapshot through the `SemanticModel`
/// trait; the builder methods are not used past that point.
///
/// Ids hand out arena indices, so a symbol's identity is its registration
/// order. Partial declarations are modeled by adding several declaration
/// sites for one symbol.
#[derive(Debug, Default)]
pub struct ProgramModel {
    symbols: Vec<SymbolData>,
    declarations: Vec<DeclarationData>,
    declaration_ids: Vec<DeclarationId>,
    /// Call sites store only their resolved callee; `None` means the
    /// target could not be bound to a declared symbol.
    callees: Vec<Option<SymbolId>>,
    operations: Vec<OperationData>,
    operation_ids: Vec<OperationId>,
    resolver_fault: Option<String>,
}

impl ProgramModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable symbol.
    pub fn add_symbol(&mut self, name: impl Into<String>) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(SymbolData {
            name: name.into(),
            declarations: Vec::new(),
        });
        id
    }

    /// Add a declaration site for `symbol`.
    pub fn add_declaration(&mut self, symbol: SymbolId, span: SourceSpan) -> DeclarationId {
        let id = DeclarationId::new(self.declarations.len() as u32);
        self.declarations.push(DeclarationData {
            symbol,
            span,
            markers: Vec::new(),
            parameter_markers: Vec::new(),
            calls: Vec::new(),
        });
        self.declaration_ids.push(id);
        self.symbols[symbol.index()].declarations.push(id);
        id
    }

    /// Attach a marker annotation to the declaration itself.
    pub fn mark_declaration(&mut self, declaration: DeclarationId, marker: impl Into<String>) {
        self.declarations[declaration.index()].markers.push(marker.into());
    }

    /// Attach a marker annotation to one of the declaration's parameters.
    pub fn mark_parameter(&mut self, declaration: DeclarationId, marker: impl Into<String>) {
        self.declarations[declaration.index()]
            .parameter_markers
            .push(marker.into());
    }

    /// Record a call expression inside `from`'s body. `callee` is `None`
    /// for targets the front-end could not resolve.
    pub fn add_call(&mut self, from: DeclarationId, callee: Option<SymbolId>) -> CallSiteId {
        let id = CallSiteId::new(self.callees.len() as u32);
        self.callees.push(callee);
        self.declarations[from.index()].calls.push(id);
        id
    }

    /// Record an operation site, attributed to the innermost declared
    /// callable containing it. Code inside a lambda or local function
    /// belongs to the declared symbol whose body hosts it.
    pub fn add_operation(
        &mut self,
        enclosing: SymbolId,
        kind: OperationKind,
        target: TargetRef,
        span: SourceSpan,
    ) -> OperationId {
        let id = OperationId::new(self.operations.len() as u32);
        self.operations.push(OperationData {
            operation: Operation { kind, target, span },
            enclosing,
        });
        self.operation_ids.push(id);
        id
    }

    /// Make every semantic query fail with `ResolverError::Unavailable`.
    /// Exercises the resolver-failure paths in tests and harnesses.
    pub fn poison_resolver(&mut self, message: impl Into<String>) {
        self.resolver_fault = Some(message.into());
    }

    fn check_resolver(&self) -> Result<(), ResolverError> {
        match &self.resolver_fault {
            Some(message) => Err(ResolverError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl SemanticModel for ProgramModel {
    fn declarations(&self) -> &[DeclarationId] {
        &self.declaration_ids
    }

    fn symbol_of(&self, declaration: DeclarationId) -> SymbolId {
        self.declarations[declaration.index()].symbol
    }

    fn declarations_of(&self, symbol: SymbolId) -> Result<&[DeclarationId], ResolverError> {
        self.check_resolver()?;
        Ok(&self.symbols[symbol.index()].declarations)
    }

    fn calls_in(&self, declaration: DeclarationId) -> Result<&[CallSiteId], ResolverError> {
        self.check_resolver()?;
        Ok(&self.declarations[declaration.index()].calls)
    }

    fn resolve_callee(&self, call: CallSiteId) -> Result<Option<SymbolId>, ResolverError> {
        self.check_resolver()?;
        Ok(self.callees[call.index()])
    }

    fn declaration_has_marker(
        &self,
        declaration: DeclarationId,
        marker: &str,
    ) -> Result<bool, ResolverError> {
        self.check_resolver()?;
        Ok(self.declarations[declaration.index()]
            .markers
            .iter()
            .any(|m| m == marker))
    }

    fn parameter_has_marker(
        &self,
        declaration: DeclarationId,
        marker: &str,
    ) -> Result<bool, ResolverError> {
        self.check_resolver()?;
        Ok(self.declarations[declaration.index()]
            .parameter_markers
            .iter()
            .any(|m| m == marker))
    }

    fn operations(&self) -> &[OperationId] {
        &self.operation_ids
    }

    fn operation(&self, operation: OperationId) -> &Operation {
        &self.operations[operation.index()].operation
    }

    fn enclosing_symbol(&self, operation: OperationId) -> Result<SymbolId, ResolverError> {
        self.check_resolver()?;
        Ok(self.operations[operation.index()].enclosing)
    }

    fn declaration_span(&self, declaration: DeclarationId) -> &SourceSpan {
        &self.declarations[declaration.index()].span
    }

    fn symbol_name(&self, symbol: SymbolId) -> &str {
        &self.symbols[symbol.index()].name
    }
}
