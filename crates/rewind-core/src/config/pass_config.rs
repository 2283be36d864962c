//! Pass configuration.

use serde::{Deserialize, Serialize};

/// Marker annotation used when none is configured. This is the annotation
/// durable-execution hosts place on replay-sensitive trigger parameters.
pub const DEFAULT_ENTRY_MARKER: &str = "OrchestrationTrigger";

/// Configuration for a single analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PassConfig {
    /// Marker annotation that designates replay-sensitive entry points.
    /// Default: `OrchestrationTrigger`.
    pub entry_marker: Option<String>,
    /// Walk operations on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl PassConfig {
    /// Returns the effective entry marker, defaulting to
    /// `OrchestrationTrigger`.
    pub fn effective_entry_marker(&self) -> &str {
        self.entry_marker.as_deref().unwrap_or(DEFAULT_ENTRY_MARKER)
    }

    /// Returns whether the operation walk runs in parallel, defaulting to
    /// true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
