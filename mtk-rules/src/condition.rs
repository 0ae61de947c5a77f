//! Condition kinds and their value-level tests
//!
//! The tests here work on already-resolved values. Resolving the subject and
//! the comparand against a record is [`Rule`](crate::Rule)'s job.
//!
//! Patterns come from external rule files, so they are compiled with the
//! `regex` crate, whose matching time is linear in the input.

use crate::field::FieldValue;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Test a rule applies to its subject field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Reserved, no defined semantics
    Contains,
    /// Case-insensitive regex search in the primary string
    ContainsRegex,
    /// Reserved, no defined semantics
    Empty,
    /// Some entry equals the comparand (ordinal)
    Equals,
    /// Reserved, no defined semantics
    GreaterThan,
    /// Reserved, no defined semantics
    LessThan,
    /// Reserved, no defined semantics
    Matches,
    /// Text is non-empty, or some list entry holds non-whitespace text
    NotEmpty,
    /// Some entry differs from the comparand (ordinal)
    NotEquals,
}

impl Condition {
    /// Conditions with defined evaluation
    ///
    /// The rest evaluate to `false` and are reported by validation.
    pub fn is_implemented(self) -> bool {
        matches!(
            self,
            Condition::ContainsRegex
                | Condition::Equals
                | Condition::NotEmpty
                | Condition::NotEquals
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::Contains => "Contains",
            Condition::ContainsRegex => "ContainsRegex",
            Condition::Empty => "Empty",
            Condition::Equals => "Equals",
            Condition::GreaterThan => "GreaterThan",
            Condition::LessThan => "LessThan",
            Condition::Matches => "Matches",
            Condition::NotEmpty => "NotEmpty",
            Condition::NotEquals => "NotEquals",
        };
        f.write_str(name)
    }
}

/// Compile a rule pattern (always case-insensitive)
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// `Equals`: any entry equals `comparand`
pub fn any_equals(value: &FieldValue, comparand: &str) -> bool {
    value.contains(comparand)
}

/// `NotEquals`: any entry differs from `comparand`
pub fn any_differs(value: &FieldValue, comparand: &str) -> bool {
    value.entries().iter().any(|entry| entry != comparand)
}

/// `NotEmpty`: text is non-empty, or some list entry holds non-whitespace text
///
/// Single text is tested as-is, so whitespace-only text counts as present.
pub fn not_empty(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => !text.is_empty(),
        FieldValue::TextList(_) => !value.is_blank(),
    }
}

/// `ContainsRegex`: the primary string is non-blank and `pattern` occurs in it
pub fn regex_matches(pattern: &Regex, value: &FieldValue) -> bool {
    match value.primary() {
        Some(text) if !text.trim().is_empty() => pattern.is_match(text),
        _ => false,
    }
}

/// Remove every match of `pattern` from `content`
pub fn regex_remove(pattern: &Regex, content: &str) -> String {
    pattern.replace_all(content, "").into_owned()
}
