//! Detection rules: compiled specs, the registry, and the matching loop.

pub mod observer;
pub mod registry;
pub mod types;

pub use observer::ObserverSet;
pub use registry::{builtin_rules, RuleRegistry};
pub use types::{CandidateSet, RuleSpec, TargetMatcher, UsageCandidate};
