//! Stable machine-readable error codes for host-side classification.

/// Accessor for the stable code of an error. Hosts switch on these instead
/// of matching display strings.
pub trait RewindErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "REWIND_E_CONFIG";
pub const RESOLVER_ERROR: &str = "REWIND_E_RESOLVER";
pub const RULE_ERROR: &str = "REWIND_E_RULE";
pub const INVARIANT_ERROR: &str = "REWIND_E_INVARIANT";
pub const CANCELLED: &str = "REWIND_E_CANCELLED";
