//! Batch tag cleaning

use crate::tags::MediaTags;
use mtk_rules::Rules;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one cleaning pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    /// Records inspected
    pub checked: usize,
    /// Records at least one rule changed
    pub updated: usize,
}

impl CleanSummary {
    /// Fold another pass into this one
    pub fn merge(&mut self, other: CleanSummary) {
        self.checked += other.checked;
        self.updated += other.updated;
    }
}

/// Run every rule over every record
pub fn clean_records(rules: &Rules, records: &mut [MediaTags]) -> CleanSummary {
    let mut summary = CleanSummary::default();

    for tags in records.iter_mut() {
        debug!("Checking: {}", tags.file_path.display());
        summary.checked += 1;

        if rules.run_all(tags) {
            info!(file = %tags.file_path.display(), "Tags updated");
            summary.updated += 1;
        }
    }

    summary
}
