//! Rule set selection and loading
//!
//! Without a configured rules file, the rule set compiled into the binary
//! is used:
//! - `RemoveDiscFromAlbum`: strips "(Disc n)" / "(Disk n)" album suffixes
//! - `RemoveCdFromAlbum`: strips " cd n" album suffixes
//! - `RemoveCopyAmountFromAlbum`: strips a trailing " (n)" copy counter
//! - `RemoveFlacFromAlbum`: strips "[FLAC]" markers
//! - `RemoveTrailingNumbersFromTitle`: strips trailing track numbers
//! - `ReplaceVariousArtists`: replaces a "Various Artists" album artist with
//!   the track performer

use mtk_common::config::RulesSource;
use mtk_rules::{Result, Rules};
use tracing::{info, warn};

/// Default rule definitions embedded at build time
pub const DEFAULT_RULES: &str = include_str!("../default_rules.json");

/// Load the rule set from `source`
///
/// With `strict`, a rule set using reserved conditions, unimplemented chain
/// combinators or malformed patterns is rejected. Otherwise the problem is
/// logged and the affected rules simply never match.
pub fn load_rules(source: &RulesSource, strict: bool) -> Result<Rules> {
    let rules = match source {
        RulesSource::File(path) => Rules::load(path)?,
        RulesSource::Embedded => {
            let rules = Rules::new(DEFAULT_RULES)?;
            info!(rule_count = rules.len(), "Using embedded default rules");
            rules
        }
    };

    if let Err(e) = rules.validate() {
        if strict {
            return Err(e);
        }
        warn!("Rule set contains unusable rules: {}", e);
    }

    Ok(rules)
}
