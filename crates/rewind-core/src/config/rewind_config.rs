//! Top-level Rewind configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{PassConfig, RulesConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`REWIND_*`)
/// 2. Project config (`rewind.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RewindConfig {
    pub pass: PassConfig,
    pub rules: RulesConfig,
}

impl RewindConfig {
    /// Load configuration for a project root: `rewind.toml` if present,
    /// then env overrides, then validation.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let project_config_path = root.join("rewind.toml");
        let mut config = if project_config_path.exists() {
            Self::from_path(&project_config_path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RewindConfig) -> Result<(), ConfigError> {
        if let Some(ref marker) = config.pass.entry_marker {
            if marker.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "pass.entry_marker".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for def in &config.rules.custom {
            if def.id.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.custom.id".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            if def.container.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.custom.container".to_string(),
                    message: format!("must not be empty (rule `{}`)", def.id),
                });
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `REWIND_ENTRY_MARKER`, `REWIND_PARALLEL`.
    fn apply_env_overrides(config: &mut RewindConfig) {
        if let Ok(val) = std::env::var("REWIND_ENTRY_MARKER") {
            if !val.is_empty() {
                config.pass.entry_marker = Some(val);
            }
        }
        if let Ok(val) = std::env::var("REWIND_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.pass.parallel = Some(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = RewindConfig::default();
        assert_eq!(config.pass.effective_entry_marker(), "OrchestrationTrigger");
        assert!(config.pass.effective_parallel());
        assert!(config.rules.enabled.is_empty());
        assert!(config.rules.custom.is_empty());
        assert!(RewindConfig::validate(&config).is_ok());
    }

    #[test]
    fn parses_full_toml() {
        let config = RewindConfig::from_toml(
            r#"
            [pass]
            entry_marker = "WorkflowRun"
            parallel = false

            [rules]
            enabled = ["RW1101"]
            disabled = ["RW1104"]

            [[rules.custom]]
            id = "RW1201"
            name = "stopwatch-timestamp"
            kinds = ["invocation"]
            container = "System.Diagnostics.Stopwatch"
            members = ["GetTimestamp"]
            severity = "error"
            "#,
        )
        .unwrap();

        assert_eq!(config.pass.effective_entry_marker(), "WorkflowRun");
        assert!(!config.pass.effective_parallel());
        assert_eq!(config.rules.enabled, vec!["RW1101"]);
        assert_eq!(config.rules.custom.len(), 1);
        assert_eq!(config.rules.custom[0].members, vec!["GetTimestamp"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = RewindConfig::from_toml(
            r#"
            [pass]
            entry_marker = "WorkflowRun"
            future_knob = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.pass.effective_entry_marker(), "WorkflowRun");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = RewindConfig::from_toml("pass = not-a-table").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn empty_marker_fails_validation() {
        let config = RewindConfig::from_toml("[pass]\nentry_marker = \"\"").unwrap();
        let err = RewindConfig::validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationFailed { ref field, .. } if field == "pass.entry_marker"
        ));
    }

    #[test]
    fn custom_rule_without_container_fails_validation() {
        let config = RewindConfig::from_toml(
            r#"
            [[rules.custom]]
            id = "RW1201"
            name = "x"
            kinds = ["invocation"]
            container = ""
            "#,
        )
        .unwrap();
        assert!(RewindConfig::validate(&config).is_err());
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let config = RewindConfig::from_toml(
            r#"
            [pass]
            entry_marker = "WorkflowRun"

            [rules]
            disabled = ["RW1102"]
            "#,
        )
        .unwrap();

        let rendered = config.to_toml().unwrap();
        let reparsed = RewindConfig::from_toml(&rendered).unwrap();
        assert_eq!(reparsed.pass.effective_entry_marker(), "WorkflowRun");
        assert_eq!(reparsed.rules.disabled, vec!["RW1102"]);
    }

    #[test]
    fn loads_project_file_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rewind.toml"),
            "[pass]\nentry_marker = \"ReplayRoot\"\n",
        )
        .unwrap();

        let config = RewindConfig::load(dir.path()).unwrap();
        assert_eq!(config.pass.effective_entry_marker(), "ReplayRoot");
    }

    #[test]
    fn missing_project_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RewindConfig::load(dir.path()).unwrap();
        assert_eq!(config.pass.effective_entry_marker(), "OrchestrationTrigger");
    }

    #[test]
    fn missing_explicit_path_is_file_not_found() {
        let err = RewindConfig::from_path(Path::new("/nonexistent/rewind.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
