//! Rule registry: the built-in catalog plus config-defined rules,
//! compiled and indexed for per-operation lookup.

use smallvec::{smallvec, SmallVec};
use tracing::warn;

use rewind_core::config::{RuleDef, RulesConfig};
use rewind_core::errors::RuleError;
use rewind_core::types::collections::{FxHashMap, FxHashSet};
use rewind_core::types::{OperationKind, Severity};

use super::types::{RuleSpec, TargetMatcher};

/// Built-in rule identifiers.
pub const WALL_CLOCK_TIME: &str = "RW1101";
pub const FRESH_GUID: &str = "RW1102";
pub const UNSEEDED_RANDOM: &str = "RW1103";
pub const ENVIRONMENT_READ: &str = "RW1104";

const DEFAULT_MESSAGE: &str = "Replay-sensitive code must not use {member}";

/// The built-in catalog: API surfaces whose results differ between an
/// original execution and a deterministic replay of it.
pub fn builtin_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec {
            id: WALL_CLOCK_TIME.to_string(),
            name: "wall-clock-time".to_string(),
            severity: Severity::Warning,
            kinds: smallvec![OperationKind::MemberAccess],
            matcher: TargetMatcher::new(
                "System.DateTime",
                vec!["Now".to_string(), "UtcNow".to_string(), "Today".to_string()],
            ),
            description: "Wall-clock reads yield different values on replay".to_string(),
            message: "Replay-sensitive code must not read {member}".to_string(),
        },
        RuleSpec {
            id: FRESH_GUID.to_string(),
            name: "fresh-guid".to_string(),
            severity: Severity::Warning,
            kinds: smallvec![OperationKind::Invocation],
            matcher: TargetMatcher::new("System.Guid", vec!["NewGuid".to_string()]),
            description: "Freshly generated GUIDs differ on every replay".to_string(),
            message: "Replay-sensitive code must not call {member}".to_string(),
        },
        RuleSpec {
            id: UNSEEDED_RANDOM.to_string(),
            name: "unseeded-random".to_string(),
            severity: Severity::Warning,
            kinds: smallvec![OperationKind::ObjectCreation, OperationKind::MemberAccess],
            matcher: TargetMatcher::new("System.Random", vec!["Shared".to_string()]),
            description: "Unseeded random sources produce a new sequence on replay".to_string(),
            message: "Replay-sensitive code must not use {member}".to_string(),
        },
        RuleSpec {
            id: ENVIRONMENT_READ.to_string(),
            name: "environment-read".to_string(),
            severity: Severity::Warning,
            kinds: smallvec![OperationKind::Invocation, OperationKind::MemberAccess],
            matcher: TargetMatcher::new(
                "System.Environment",
                vec![
                    "GetEnvironmentVariable".to_string(),
                    "GetEnvironmentVariables".to_string(),
                    "MachineName".to_string(),
                ],
            ),
            description: "Process environment reads vary across hosts and replays".to_string(),
            message: "Replay-sensitive code must not read {member}".to_string(),
        },
    ]
}

/// The compiled, filtered rule set for one pass, indexed by target
/// container so per-operation matching touches only the rules that could
/// possibly apply.
#[derive(Debug)]
pub struct RuleRegistry {
    rules: Vec<RuleSpec>,
    by_container: FxHashMap<String, SmallVec<[usize; 2]>>,
}

impl RuleRegistry {
    /// Built-ins merged with config-defined rules, then filtered by the
    /// config's enable and disable lists.
    pub fn from_config(config: &RulesConfig) -> Result<Self, RuleError> {
        let mut rules = builtin_rules();
        let mut ids: FxHashSet<String> = rules.iter().map(|rule| rule.id.clone()).collect();

        for def in &config.custom {
            let spec = compile_rule(def)?;
            if !ids.insert(spec.id.clone()) {
                return Err(RuleError::DuplicateId(spec.id));
            }
            rules.push(spec);
        }

        // Selection lists naming unknown ids are config typos; failing
        // beats silently analyzing with the wrong rule set.
        for id in config.enabled.iter().chain(config.disabled.iter()) {
            if !ids.contains(id) {
                return Err(RuleError::UnknownRuleId(id.clone()));
            }
        }
        if !config.enabled.is_empty() {
            rules.retain(|rule| config.enabled.contains(&rule.id));
        }
        rules.retain(|rule| !config.disabled.contains(&rule.id));

        Ok(Self::from_rules(rules))
    }

    /// Index an already-compiled rule list.
    pub fn from_rules(rules: Vec<RuleSpec>) -> Self {
        let mut by_container: FxHashMap<String, SmallVec<[usize; 2]>> = FxHashMap::default();
        for (index, rule) in rules.iter().enumerate() {
            by_container
                .entry(rule.matcher.container.clone())
                .or_default()
                .push(index);
        }
        Self {
            rules,
            by_container,
        }
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(&self, index: usize) -> &RuleSpec {
        &self.rules[index]
    }

    /// Indices of rules whose matcher shares the given container.
    pub fn candidates_for(&self, container: &str) -> &[usize] {
        self.by_container
            .get(container)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
    }
}

fn compile_rule(def: &RuleDef) -> Result<RuleSpec, RuleError> {
    if def.id.is_empty() {
        return Err(RuleError::InvalidDefinition {
            id: "<unnamed>".to_string(),
            message: "rule id must not be empty".to_string(),
        });
    }
    if def.container.is_empty() {
        return Err(RuleError::InvalidDefinition {
            id: def.id.clone(),
            message: "target container must not be empty".to_string(),
        });
    }
    if def.kinds.is_empty() {
        return Err(RuleError::InvalidDefinition {
            id: def.id.clone(),
            message: "at least one operation kind is required".to_string(),
        });
    }

    let mut kinds: SmallVec<[OperationKind; 2]> = SmallVec::new();
    for raw in &def.kinds {
        match OperationKind::parse_str(raw) {
            Some(kind) => {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            None => {
                return Err(RuleError::UnknownKind {
                    id: def.id.clone(),
                    kind: raw.clone(),
                })
            }
        }
    }

    if def.members.is_empty() && kinds.iter().any(|kind| *kind != OperationKind::ObjectCreation) {
        warn!(
            rule = %def.id,
            container = %def.container,
            "empty member list matches every member of the container"
        );
    }

    Ok(RuleSpec {
        id: def.id.clone(),
        name: def.name.clone(),
        severity: def.severity.unwrap_or(Severity::Warning),
        kinds,
        matcher: TargetMatcher::new(def.container.clone(), def.members.clone()),
        description: def.description.clone(),
        message: if def.message.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            def.message.clone()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_def(id: &str) -> RuleDef {
        RuleDef {
            id: id.to_string(),
            name: "stopwatch-timestamp".to_string(),
            kinds: vec!["invocation".to_string()],
            container: "System.Diagnostics.Stopwatch".to_string(),
            members: vec!["GetTimestamp".to_string()],
            severity: None,
            description: String::new(),
            message: String::new(),
        }
    }

    #[test]
    fn builtin_catalog_is_indexed_by_container() {
        let registry = RuleRegistry::from_rules(builtin_rules());

        assert_eq!(registry.len(), 4);
        let time_rules = registry.candidates_for("System.DateTime");
        assert_eq!(time_rules.len(), 1);
        assert_eq!(registry.rule(time_rules[0]).id, WALL_CLOCK_TIME);
        assert!(registry.candidates_for("System.Console").is_empty());
    }

    #[test]
    fn custom_rules_merge_with_builtins() {
        let config = RulesConfig {
            custom: vec![custom_def("RW1201")],
            ..RulesConfig::default()
        };
        let registry = RuleRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 5);
        let indices = registry.candidates_for("System.Diagnostics.Stopwatch");
        assert_eq!(registry.rule(indices[0]).severity, Severity::Warning);
        assert_eq!(registry.rule(indices[0]).message, DEFAULT_MESSAGE);
    }

    #[test]
    fn duplicate_rule_id_is_rejected() {
        let config = RulesConfig {
            custom: vec![custom_def(WALL_CLOCK_TIME)],
            ..RulesConfig::default()
        };
        assert!(matches!(
            RuleRegistry::from_config(&config),
            Err(RuleError::DuplicateId(id)) if id == WALL_CLOCK_TIME
        ));
    }

    #[test]
    fn unknown_operation_kind_is_rejected() {
        let mut def = custom_def("RW1201");
        def.kinds = vec!["property_reference".to_string()];
        let config = RulesConfig {
            custom: vec![def],
            ..RulesConfig::default()
        };
        assert!(matches!(
            RuleRegistry::from_config(&config),
            Err(RuleError::UnknownKind { kind, .. }) if kind == "property_reference"
        ));
    }

    #[test]
    fn empty_kind_list_is_rejected() {
        let mut def = custom_def("RW1201");
        def.kinds.clear();
        let config = RulesConfig {
            custom: vec![def],
            ..RulesConfig::default()
        };
        assert!(matches!(
            RuleRegistry::from_config(&config),
            Err(RuleError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn enable_list_keeps_only_named_rules() {
        let config = RulesConfig {
            enabled: vec![FRESH_GUID.to_string()],
            ..RulesConfig::default()
        };
        let registry = RuleRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rules()[0].id, FRESH_GUID);
    }

    #[test]
    fn disable_list_removes_rules() {
        let config = RulesConfig {
            disabled: vec![WALL_CLOCK_TIME.to_string(), ENVIRONMENT_READ.to_string()],
            ..RulesConfig::default()
        };
        let registry = RuleRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.candidates_for("System.DateTime").is_empty());
    }

    #[test]
    fn unknown_id_in_selection_lists_is_rejected() {
        let config = RulesConfig {
            enabled: vec!["RW9999".to_string()],
            ..RulesConfig::default()
        };
        assert!(matches!(
            RuleRegistry::from_config(&config),
            Err(RuleError::UnknownRuleId(id)) if id == "RW9999"
        ));
    }
}
