//! Rule operands: literal text or a reference to another field

use crate::field::{get_primary, FieldPath, Record};
use std::fmt;

/// Value a rule compares against or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Fixed text (or a regex pattern, for `ContainsRegex`)
    Literal(String),
    /// Another field on the same record, resolved at evaluation time
    FieldRef(FieldPath),
}

impl Operand {
    /// Literal operand
    pub fn literal(text: impl Into<String>) -> Self {
        Operand::Literal(text.into())
    }

    /// Field reference operand
    pub fn field(path: impl Into<FieldPath>) -> Self {
        Operand::FieldRef(path.into())
    }

    /// Resolve to concrete text for `record`
    ///
    /// A field reference resolves to the referenced field's primary string,
    /// or `None` when the field is missing or holds nothing.
    pub fn resolve(&self, record: &dyn Record) -> Option<String> {
        match self {
            Operand::Literal(text) => Some(text.clone()),
            Operand::FieldRef(path) => get_primary(record, path),
        }
    }

    /// Raw text: the literal itself or the referenced path
    pub fn raw(&self) -> &str {
        match self {
            Operand::Literal(text) => text,
            Operand::FieldRef(path) => path.as_str(),
        }
    }

    pub fn is_field_ref(&self) -> bool {
        matches!(self, Operand::FieldRef(_))
    }
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Literal(String::new())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(text) => write!(f, "{:?}", text),
            Operand::FieldRef(path) => write!(f, "${}", path),
        }
    }
}
