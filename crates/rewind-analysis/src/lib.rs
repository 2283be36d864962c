//! Analysis engine: entry-point discovery, call-graph reachability, rule
//! observation, and end-of-pass reconciliation into findings.
//!
//! The engine consumes a program snapshot through `rewind_core`'s
//! [`SemanticModel`](rewind_core::SemanticModel) trait and reports through
//! [`DiagnosticSink`](rewind_core::DiagnosticSink). [`ProgramModel`] is the
//! canonical in-memory snapshot front-ends populate. [`run_pass`] is the
//! one-call surface; [`AnalysisPass`] exposes the configurable one.

pub mod entry_points;
pub mod model;
pub mod pass;
pub mod reachability;
pub mod reconcile;
pub mod rules;

pub use entry_points::EntryPointScanner;
pub use model::ProgramModel;
pub use pass::{run_pass, AnalysisPass, PassReport, PassStats};
pub use reachability::{CallGraphExplorer, FrozenReachability, ReachabilitySet};
pub use reconcile::Reconciler;
pub use rules::{
    builtin_rules, ObserverSet, RuleRegistry, RuleSpec, TargetMatcher, UsageCandidate,
};
