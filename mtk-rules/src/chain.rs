//! Chain combinators linking a rule to its chained rule

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a rule combines with its chained rule
///
/// `And` and `Or` traverse identically: once the parent condition holds,
/// the chained rule runs and its result is the parent's result. `Xor` is
/// accepted in definitions but has no defined semantics; it traverses like
/// `And` and is reported by [`Rule::validate`](crate::Rule::validate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    #[default]
    None,
    And,
    Or,
    Xor,
}

impl Chain {
    /// Combinators whose semantics are defined
    pub fn is_implemented(self) -> bool {
        !matches!(self, Chain::Xor)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::None => "None",
            Chain::And => "And",
            Chain::Or => "Or",
            Chain::Xor => "Xor",
        };
        f.write_str(name)
    }
}
