//! TOML-backed configuration with `REWIND_*` env overrides.

pub mod pass_config;
pub mod rewind_config;
pub mod rules_config;

pub use pass_config::{PassConfig, DEFAULT_ENTRY_MARKER};
pub use rewind_config::RewindConfig;
pub use rules_config::{RuleDef, RulesConfig};
