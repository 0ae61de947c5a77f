//! Single declarative rule: condition, optional chain, terminal action
//!
//! # Run algorithm
//!
//! 1. Resolve the subject field. Unresolved: no match, no mutation.
//! 2. Evaluate the condition. False: stop, the chain is never visited.
//! 3. With a chained rule: run it and return its result. The parent never
//!    applies its own operation.
//! 4. Without one (terminal rule): apply the action and return its result.

use crate::chain::Chain;
use crate::condition::{
    any_differs, any_equals, compile_pattern, not_empty, regex_matches, regex_remove, Condition,
};
use crate::definition::ConditionalType;
use crate::error::{Result, RulesError};
use crate::field::{get_field_value, set_field_value, FieldPath, FieldValue, Record};
use crate::operand::Operand;
use crate::operation::Operation;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, error, warn};

/// Match-and-mutate rule
///
/// Immutable once built; the `with_*` methods consume and return the rule.
/// `comparand` is what the condition tests against, `replacement` is what
/// `Replace` writes. They are kept separate even when a legacy definition
/// used one string for both.
#[derive(Debug, Clone)]
pub struct Rule {
    subject: FieldPath,
    condition: Condition,
    comparand: Operand,
    operation: Operation,
    replacement: Option<Operand>,
    chain: Chain,
    chain_rule: Option<Box<Rule>>,
    name: Option<String>,
    /// Compiled `ContainsRegex` pattern, `None` inside when malformed
    pattern: OnceLock<Option<Regex>>,
}

impl Rule {
    /// Create a terminal rule
    pub fn new(
        subject: impl Into<FieldPath>,
        condition: Condition,
        comparand: Operand,
        operation: Operation,
    ) -> Self {
        Self {
            subject: subject.into(),
            condition,
            comparand,
            operation,
            replacement: None,
            chain: Chain::None,
            chain_rule: None,
            name: None,
            pattern: OnceLock::new(),
        }
    }

    pub fn with_comparand(mut self, comparand: Operand) -> Self {
        self.comparand = comparand;
        self.pattern = OnceLock::new();
        self
    }

    pub fn with_replacement(mut self, replacement: Operand) -> Self {
        self.replacement = Some(replacement);
        self
    }

    /// Chain `next` behind this rule, making this rule non-terminal
    pub fn with_chain(mut self, chain: Chain, next: Rule) -> Self {
        self.chain = chain;
        self.chain_rule = Some(Box::new(next));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn subject(&self) -> &FieldPath {
        &self.subject
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn comparand(&self) -> &Operand {
        &self.comparand
    }

    /// How the comparand is resolved, derived from its variant
    pub fn conditional_type(&self) -> ConditionalType {
        ConditionalType::of(&self.comparand)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn replacement(&self) -> Option<&Operand> {
        self.replacement.as_ref()
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn chain_rule(&self) -> Option<&Rule> {
        self.chain_rule.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True when no rule is chained behind this one
    pub fn is_terminal(&self) -> bool {
        self.chain_rule.is_none()
    }

    /// Name for log and error messages: the rule name, else the subject path
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.subject.to_string(),
        }
    }

    /// Compiled `ContainsRegex` pattern
    ///
    /// Compiled on first use. A malformed pattern is logged once and the
    /// rule never matches. Field references are never used as patterns.
    fn pattern(&self) -> Option<&Regex> {
        let Operand::Literal(text) = &self.comparand else {
            return None;
        };

        self.pattern
            .get_or_init(|| match compile_pattern(text) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    error!(
                        rule = %self.label(),
                        pattern = %text,
                        "Invalid rule pattern, rule disabled: {}",
                        e
                    );
                    None
                }
            })
            .as_ref()
    }

    /// Decide whether the condition holds for `subject_value`
    ///
    /// Reserved condition kinds never hold.
    pub fn evaluate(&self, record: &dyn Record, subject_value: &FieldValue) -> bool {
        match self.condition {
            Condition::Equals => self
                .comparand
                .resolve(record)
                .is_some_and(|comparand| any_equals(subject_value, &comparand)),
            Condition::NotEquals => self
                .comparand
                .resolve(record)
                .is_some_and(|comparand| any_differs(subject_value, &comparand)),
            Condition::ContainsRegex => self
                .pattern()
                .is_some_and(|pattern| regex_matches(pattern, subject_value)),
            Condition::NotEmpty => not_empty(subject_value),
            Condition::Contains
            | Condition::Empty
            | Condition::GreaterThan
            | Condition::LessThan
            | Condition::Matches => {
                warn!(
                    rule = %self.label(),
                    condition = %self.condition,
                    "Condition not implemented, treating as no match"
                );
                false
            }
        }
    }

    /// Perform this rule's action on its subject
    ///
    /// - `ContainsRegex`: strip every match from the primary string; true
    ///   only if the field actually changed
    /// - `Replace`: write the resolved replacement; true only if the field
    ///   actually changed
    /// - `None`: no mutation, true to report the condition held
    pub fn apply(&self, record: &mut dyn Record, subject_value: &FieldValue) -> bool {
        let mut changed = false;

        if self.condition == Condition::ContainsRegex {
            if let (Some(pattern), Some(content)) = (self.pattern(), subject_value.primary()) {
                let cleaned = regex_remove(pattern, content);
                changed = self.write_subject(record, &cleaned);
            }
        }

        match self.operation {
            Operation::Replace => match &self.replacement {
                Some(replacement) => match replacement.resolve(record) {
                    Some(value) => changed = self.write_subject(record, &value),
                    None => debug!(
                        rule = %self.label(),
                        replacement = %replacement,
                        "Replacement did not resolve, nothing written"
                    ),
                },
                None => warn!(rule = %self.label(), "Replace rule has no replacement"),
            },
            Operation::None if self.condition != Condition::ContainsRegex => changed = true,
            Operation::None | Operation::Remove => {}
        }

        changed
    }

    /// Write `value` to the subject unless it is already there
    fn write_subject(&self, record: &mut dyn Record, value: &str) -> bool {
        match get_field_value(record, &self.subject) {
            Some(current) if current.with_primary(value) == current => false,
            Some(_) => {
                let written = set_field_value(record, &self.subject, value);
                if written {
                    debug!(
                        rule = %self.label(),
                        subject = %self.subject,
                        value = %value,
                        "Field updated"
                    );
                }
                written
            }
            None => false,
        }
    }

    /// Run this rule against `record`
    ///
    /// Returns the terminal rule's action result, or `false` when any
    /// condition along the chain fails or the subject does not resolve.
    pub fn run(&self, record: &mut dyn Record) -> bool {
        let Some(subject_value) = get_field_value(record, &self.subject) else {
            debug!(
                rule = %self.label(),
                subject = %self.subject,
                "Subject not found, rule skipped"
            );
            return false;
        };

        if !self.evaluate(record, &subject_value) {
            return false;
        }

        debug!(rule = %self.label(), condition = %self.condition, "Condition met");

        match &self.chain_rule {
            Some(next) => next.run(record),
            None => self.apply(record, &subject_value),
        }
    }

    /// Check the rule and its whole chain for settings with no defined behavior
    pub fn validate(&self) -> Result<()> {
        let rule = self.label();

        if self.subject.is_empty() {
            return Err(RulesError::InvalidRule {
                rule,
                reason: "subject is empty".to_string(),
            });
        }

        if !self.condition.is_implemented() {
            return Err(RulesError::Unimplemented {
                rule,
                feature: format!("condition {}", self.condition),
            });
        }

        if self.condition == Condition::ContainsRegex {
            if self.comparand.is_field_ref() {
                return Err(RulesError::InvalidRule {
                    rule,
                    reason: "ContainsRegex needs a literal pattern".to_string(),
                });
            }
            compile_pattern(self.comparand.raw())
                .map_err(|source| RulesError::InvalidPattern { rule: rule.clone(), source })?;
        }

        match self.operation {
            Operation::Replace if self.replacement.is_none() => {
                return Err(RulesError::InvalidRule {
                    rule,
                    reason: "Replace without a replacement".to_string(),
                });
            }
            Operation::Remove if self.condition != Condition::ContainsRegex => {
                return Err(RulesError::InvalidRule {
                    rule,
                    reason: format!("Remove needs ContainsRegex, not {}", self.condition),
                });
            }
            _ => {}
        }

        if let Some(next) = &self.chain_rule {
            if !self.chain.is_implemented() {
                return Err(RulesError::Unimplemented {
                    rule,
                    feature: format!("chain {}", self.chain),
                });
            }
            next.validate()?;
        }

        Ok(())
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.condition == other.condition
            && self.comparand == other.comparand
            && self.operation == other.operation
            && self.replacement == other.replacement
            && self.chain == other.chain
            && self.chain_rule == other.chain_rule
            && self.name == other.name
    }
}
