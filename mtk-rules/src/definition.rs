//! Serialized rule definition format
//!
//! Rule files are a JSON array of objects:
//!
//! ```json
//! [
//!   {
//!     "name": "RemoveDiscFromAlbum",
//!     "subject": "Album",
//!     "condition": "ContainsRegex",
//!     "conditional": "\\s*\\(Dis(c|k).*?\\)",
//!     "operation": "Remove"
//!   }
//! ]
//! ```
//!
//! Keys are camelCase; PascalCase keys are accepted as well. Enum values are
//! variant names (`"ContainsRegex"`, `"Replace"`, `"And"`, ...).

use crate::chain::Chain;
use crate::condition::Condition;
use crate::error::{Result, RulesError};
use crate::field::FieldPath;
use crate::operand::Operand;
use crate::operation::Operation;
use crate::rule::Rule;
use serde::{Deserialize, Serialize};

/// How `conditional` and `replacement` strings are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalType {
    /// Text taken as-is
    #[default]
    Literal,
    /// Text is a field path resolved against the record
    Property,
}

impl ConditionalType {
    /// Type an operand is written with
    pub fn of(operand: &Operand) -> Self {
        match operand {
            Operand::Literal(_) => ConditionalType::Literal,
            Operand::FieldRef(_) => ConditionalType::Property,
        }
    }
}

/// One rule as it appears in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    #[serde(default, alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(alias = "Subject")]
    pub subject: String,

    #[serde(alias = "Condition")]
    pub condition: Condition,

    /// Comparand text: literal, field path, or regex pattern
    #[serde(default, alias = "Conditional", skip_serializing_if = "Option::is_none")]
    pub conditional: Option<String>,

    #[serde(default, alias = "ConditionalType")]
    pub conditional_type: ConditionalType,

    #[serde(default, alias = "Operation")]
    pub operation: Operation,

    #[serde(default, alias = "Replacement", skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,

    #[serde(default, alias = "Chain")]
    pub chain: Chain,

    #[serde(default, alias = "ChainRule", skip_serializing_if = "Option::is_none")]
    pub chain_rule: Option<Box<RuleDefinition>>,
}

impl RuleDefinition {
    fn operand(&self, text: String) -> Operand {
        match self.conditional_type {
            ConditionalType::Literal => Operand::Literal(text),
            ConditionalType::Property => Operand::FieldRef(FieldPath::new(text)),
        }
    }
}

impl From<RuleDefinition> for Rule {
    /// Build a rule from its definition
    ///
    /// A literal `Replace` definition without a `replacement` uses its
    /// `conditional` text as the replacement, which is how older rule files
    /// express "replace with this text".
    fn from(definition: RuleDefinition) -> Self {
        let conditional = definition.conditional.clone().unwrap_or_default();
        let comparand = match &definition.conditional {
            Some(text) => definition.operand(text.clone()),
            None => Operand::default(),
        };

        let replacement = match (&definition.replacement, definition.conditional_type) {
            (Some(text), _) => Some(definition.operand(text.clone())),
            (None, ConditionalType::Literal) if definition.operation == Operation::Replace => {
                Some(Operand::Literal(conditional))
            }
            (None, _) => None,
        };

        let mut rule = Rule::new(
            FieldPath::new(definition.subject),
            definition.condition,
            comparand,
            definition.operation,
        );

        if let Some(replacement) = replacement {
            rule = rule.with_replacement(replacement);
        }
        if let Some(next) = definition.chain_rule {
            rule = rule.with_chain(definition.chain, Rule::from(*next));
        }
        if let Some(name) = definition.name {
            rule = rule.with_name(name);
        }

        rule
    }
}

impl TryFrom<&Rule> for RuleDefinition {
    type Error = RulesError;

    /// Describe a rule in the definition format
    ///
    /// One `conditionalType` covers both `conditional` and `replacement`,
    /// so a rule mixing literal text with a field reference has no faithful
    /// definition and is refused.
    fn try_from(rule: &Rule) -> Result<Self> {
        let comparand = rule.comparand();
        let conditional = comparand.raw();

        let conditional_type = match (comparand, rule.replacement()) {
            (Operand::FieldRef(path), _) if path.is_empty() => {
                return Err(RulesError::InvalidRule {
                    rule: rule.label(),
                    reason: "field reference comparand has an empty path".to_string(),
                });
            }
            (_, Some(replacement)) if conditional.is_empty() => ConditionalType::of(replacement),
            (_, Some(replacement))
                if ConditionalType::of(replacement) != rule.conditional_type() =>
            {
                return Err(RulesError::InvalidRule {
                    rule: rule.label(),
                    reason: "comparand and replacement mix literal text and field references"
                        .to_string(),
                });
            }
            _ => rule.conditional_type(),
        };

        let chain_rule = rule
            .chain_rule()
            .map(|next| RuleDefinition::try_from(next).map(Box::new))
            .transpose()?;

        Ok(Self {
            name: rule.name().map(str::to_string),
            subject: rule.subject().to_string(),
            condition: rule.condition(),
            conditional: (!conditional.is_empty()).then(|| conditional.to_string()),
            conditional_type,
            operation: rule.operation(),
            replacement: rule.replacement().map(|r| r.raw().to_string()),
            chain: rule.chain(),
            chain_rule,
        })
    }
}
