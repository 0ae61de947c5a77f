//! Error types for the rule engine
//!
//! Only loading and validation can fail. Evaluating a rule against a record
//! never returns an error: an unresolvable path or a non-matching value just
//! means the rule does not apply.

use thiserror::Error;

/// Result type for rule loading and validation
pub type Result<T> = std::result::Result<T, RulesError>;

/// Rule engine errors
#[derive(Error, Debug)]
pub enum RulesError {
    /// Rule definition blob is present but not valid JSON for the rule format
    #[error("Rule definition parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading a rule definition file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A rule is structurally unusable (blank subject, missing replacement, ...)
    #[error("Invalid rule {rule}: {reason}")]
    InvalidRule { rule: String, reason: String },

    /// A `ContainsRegex` pattern does not compile
    #[error("Invalid pattern in rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A rule selects a condition or chain combinator with no defined behavior
    #[error("Not implemented in rule {rule}: {feature}")]
    Unimplemented { rule: String, feature: String },
}
