//! Error handling for Rewind.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod invariant_error;
pub mod pass_error;
pub mod resolver_error;
pub mod rule_error;

pub use config_error::ConfigError;
pub use error_code::RewindErrorCode;
pub use invariant_error::InvariantError;
pub use pass_error::PassError;
pub use resolver_error::ResolverError;
pub use rule_error::RuleError;
