//! Ordered rule set and batch driver

use crate::definition::RuleDefinition;
use crate::error::Result;
use crate::field::Record;
use crate::rule::Rule;
use std::path::Path;
use tracing::{debug, info};

/// Ordered collection of rules loaded from a definition blob
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    /// Parse a JSON rule definition blob
    ///
    /// A blank blob yields an empty rule set. A present but malformed blob
    /// is an error.
    pub fn new(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            debug!("Empty rule definition, no rules loaded");
            return Ok(Self::default());
        }

        let definitions: Vec<RuleDefinition> = serde_json::from_str(data)?;
        let rules: Vec<Rule> = definitions.into_iter().map(Rule::from).collect();

        debug!(rule_count = rules.len(), "Rules loaded");
        Ok(Self { rules })
    }

    /// Read and parse a rule definition file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let rules = Self::new(&data)?;
        info!(path = %path.display(), rule_count = rules.len(), "Loaded rules file");
        Ok(rules)
    }

    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule; it runs after every rule already present
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First top-level rule whose name matches, ignoring case
    ///
    /// Chained rules are not searched. Unnamed rules never match.
    pub fn get_by_name(&self, name: &str) -> Option<&Rule> {
        let wanted = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.name().is_some_and(|rule_name| rule_name.to_lowercase() == wanted))
    }

    /// Run every rule, in order, against `record`
    ///
    /// No early exit: all rules run so independent normalizations can apply
    /// in one pass. Returns true if any rule reported a change.
    pub fn run_all(&self, record: &mut dyn Record) -> bool {
        let mut updated = false;

        for rule in &self.rules {
            if rule.run(record) {
                debug!(rule = %rule.label(), "Rule applied");
                updated = true;
            }
        }

        updated
    }

    /// Validate every rule, reporting the first failure
    pub fn validate(&self) -> Result<()> {
        self.rules.iter().try_for_each(Rule::validate)
    }

    /// Pretty JSON in the definition file format
    ///
    /// Fails when a rule cannot be described without changing what it does.
    pub fn to_json(&self) -> Result<String> {
        let definitions = self
            .rules
            .iter()
            .map(RuleDefinition::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(serde_json::to_string_pretty(&definitions)?)
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
