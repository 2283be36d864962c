//! Tests for the error subsystem: stable codes, `From` conversions, and
//! display hygiene.

use std::collections::HashSet;

use rewind_core::errors::error_code;
use rewind_core::errors::{
    ConfigError, InvariantError, PassError, ResolverError, RewindErrorCode, RuleError,
};
use rewind_core::types::SourceSpan;

#[test]
fn every_error_carries_its_code() {
    let config = ConfigError::FileNotFound {
        path: "/tmp/rewind.toml".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let resolver = ResolverError::Unavailable("semantic host went away".into());
    assert_eq!(resolver.error_code(), error_code::RESOLVER_ERROR);

    let rule = RuleError::DuplicateId("RW1101".into());
    assert_eq!(rule.error_code(), error_code::RULE_ERROR);

    let invariant = InvariantError::DuplicateEntry {
        symbol: "OrderWorkflow".into(),
        span: SourceSpan::new("orders.cs", 12, 4),
    };
    assert_eq!(invariant.error_code(), error_code::INVARIANT_ERROR);

    assert_eq!(PassError::Cancelled.error_code(), error_code::CANCELLED);
}

#[test]
fn pass_error_reports_the_inner_code() {
    let from_resolver: PassError = ResolverError::Timeout { timeout_ms: 500 }.into();
    assert_eq!(from_resolver.error_code(), error_code::RESOLVER_ERROR);

    let from_rule: PassError = RuleError::UnknownRuleId("RW9999".into()).into();
    assert_eq!(from_rule.error_code(), error_code::RULE_ERROR);

    let from_invariant: PassError = InvariantError::DuplicateEntry {
        symbol: "Run".into(),
        span: SourceSpan::new("run.cs", 1, 1),
    }
    .into();
    assert_eq!(from_invariant.error_code(), error_code::INVARIANT_ERROR);
}

#[test]
fn from_conversions_pick_the_matching_variant() {
    let pass: PassError = ResolverError::Unavailable("gone".into()).into();
    assert!(matches!(
        pass,
        PassError::Resolver(ResolverError::Unavailable(_))
    ));

    let pass: PassError = RuleError::UnknownKind {
        id: "RW9001".into(),
        kind: "property_reference".into(),
    }
    .into();
    assert!(matches!(pass, PassError::Rule(RuleError::UnknownKind { .. })));

    let pass: PassError = InvariantError::DuplicateEntry {
        symbol: "Run".into(),
        span: SourceSpan::new("run.cs", 3, 9),
    }
    .into();
    assert!(matches!(pass, PassError::Invariant(_)));
}

#[test]
fn display_is_human_readable() {
    let errors: Vec<Box<dyn std::fmt::Display>> = vec![
        Box::new(ConfigError::FileNotFound {
            path: "/tmp/rewind.toml".into(),
        }),
        Box::new(ConfigError::ParseError {
            path: "rewind.toml".into(),
            message: "unexpected eof".into(),
        }),
        Box::new(ConfigError::ValidationFailed {
            field: "pass.entry_marker".into(),
            message: "must not be empty".into(),
        }),
        Box::new(ResolverError::Unavailable("semantic host went away".into())),
        Box::new(ResolverError::Timeout { timeout_ms: 5000 }),
        Box::new(ResolverError::Inconsistent(
            "declaration without a symbol".into(),
        )),
        Box::new(RuleError::InvalidDefinition {
            id: "RW9001".into(),
            message: "no containers listed".into(),
        }),
        Box::new(RuleError::UnknownKind {
            id: "RW9001".into(),
            kind: "property_reference".into(),
        }),
        Box::new(RuleError::DuplicateId("RW1101".into())),
        Box::new(RuleError::UnknownRuleId("RW0000".into())),
        Box::new(InvariantError::DuplicateEntry {
            symbol: "OrderWorkflow".into(),
            span: SourceSpan::new("orders.cs", 12, 4),
        }),
        Box::new(PassError::Cancelled),
    ];

    for error in &errors {
        let msg = error.to_string();
        assert!(!msg.is_empty());
        // No Debug formatting artifacts in user-facing messages.
        assert!(!msg.contains("{ "), "Debug leak in: {}", msg);
    }
}

#[test]
fn invariant_message_names_the_symbol_and_site() {
    let err = InvariantError::DuplicateEntry {
        symbol: "OrderWorkflow".into(),
        span: SourceSpan::new("orders.cs", 12, 4),
    };
    let msg = err.to_string();
    assert!(msg.contains("OrderWorkflow"));
    assert!(msg.contains("orders.cs:12:4"));
}

#[test]
fn error_codes_are_unique() {
    let codes = [
        error_code::CONFIG_ERROR,
        error_code::RESOLVER_ERROR,
        error_code::RULE_ERROR,
        error_code::INVARIANT_ERROR,
        error_code::CANCELLED,
    ];

    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(codes.len(), unique.len(), "Duplicate error codes found");
}
