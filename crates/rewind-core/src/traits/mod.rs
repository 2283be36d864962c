//! Collaborator seams the engine consumes but never implements, plus the
//! cancellation token shared between host and engine.

pub mod cancellation;
pub mod diagnostic_sink;
pub mod semantic_model;

pub use cancellation::CancellationToken;
pub use diagnostic_sink::{CollectSink, DiagnosticSink};
pub use semantic_model::SemanticModel;
