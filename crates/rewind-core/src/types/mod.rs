//! Shared vocabulary of the engine: identifiers, spans, operations, findings.

pub mod collections;
pub mod finding;
pub mod ids;
pub mod operation;
pub mod span;

pub use finding::{Finding, Severity};
pub use ids::{CallSiteId, DeclarationId, OperationId, SymbolId};
pub use operation::{Operation, OperationKind, TargetRef};
pub use span::SourceSpan;
