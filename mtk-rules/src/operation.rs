//! Operations a terminal rule performs on its subject field

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutation applied once a terminal rule's condition holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// No mutation; the rule only reports that its condition held
    #[default]
    None,
    /// Strip the matched text (paired with `ContainsRegex`)
    Remove,
    /// Overwrite the subject with the rule's replacement operand
    Replace,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::None => "None",
            Operation::Remove => "Remove",
            Operation::Replace => "Replace",
        };
        f.write_str(name)
    }
}
