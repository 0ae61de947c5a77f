//! mtk-clean library - tag normalization driver
//!
//! Runs a rule set over tag snapshots of media files:
//! - [`MediaTags`]: the tag record rules operate on
//! - [`rule_set`]: embedded default rules and rules loading
//! - [`snapshot`]: JSON snapshot reading and writing
//! - [`clean`]: batch execution and summary

pub mod clean;
pub mod rule_set;
pub mod snapshot;
pub mod tags;

pub use clean::{clean_records, CleanSummary};
pub use tags::MediaTags;
