//! # MTK Rules
//!
//! Declarative match-and-mutate engine for tag records:
//! - Field path resolution against any type implementing [`Record`]
//! - Condition evaluation (equality, regex containment, emptiness)
//! - Actions (regex strip, literal or field-to-field replacement)
//! - Chained rules, where only the terminal rule mutates
//! - Rule sets loaded from a JSON definition blob
//!
//! Rules are immutable once loaded and hold no per-record state, so a
//! [`Rules`] set may be shared read-only across threads working on
//! different records.

pub mod chain;
pub mod condition;
pub mod definition;
pub mod error;
pub mod field;
pub mod operand;
pub mod operation;
pub mod rule;
pub mod rules;

pub use chain::Chain;
pub use condition::Condition;
pub use definition::{ConditionalType, RuleDefinition};
pub use error::{Result, RulesError};
pub use field::{FieldPath, FieldValue, Record};
pub use operand::Operand;
pub use operation::Operation;
pub use rule::Rule;
pub use rules::Rules;
