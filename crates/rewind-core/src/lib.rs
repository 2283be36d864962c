//! Core types, traits, errors, and configuration for the Rewind
//! replay-safety analysis engine.
//!
//! Subsystems:
//! - `types`: id newtypes, source spans, operations, findings, collection aliases
//! - `traits`: the semantic-model and diagnostic-sink seams, cancellation
//! - `errors`: one error enum per subsystem, `thiserror` only
//! - `config`: TOML-backed configuration with `REWIND_*` env overrides
//! - `telemetry`: tracing subscriber setup for embedding hosts

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod traits;
pub mod types;

pub use config::{PassConfig, RewindConfig, RuleDef, RulesConfig};
pub use errors::{
    ConfigError, InvariantError, PassError, ResolverError, RewindErrorCode, RuleError,
};
pub use traits::{CancellationToken, CollectSink, DiagnosticSink, SemanticModel};
pub use types::{
    CallSiteId, DeclarationId, Finding, Operation, OperationId, OperationKind, Severity,
    SourceSpan, SymbolId, TargetRef,
};
