use std::collections::HashMap;

use crate::cluster::build_clusters;
use crate::config::MatchOptions;
use crate::error::ResolveError;
use crate::matcher::find_duplicates;
use crate::merge::merge_group;
use crate::model::{CanonicalRecord, ContactRecord, DedupMeta, DedupOutcome, RecordId};
use crate::summary::compute_summary;

/// Run the full resolution pipeline: match → cluster → merge.
///
/// Each cluster's canonical record is emitted at the position of the
/// cluster's lowest member; records that appear in no pair pass through
/// unchanged, so output order is a deterministic function of input order.
pub fn dedupe(
    records: &[ContactRecord],
    options: &MatchOptions,
) -> Result<DedupOutcome, ResolveError> {
    options.validate()?;

    let pairs = find_duplicates(records, options);
    let groups = build_clusters(&pairs);

    let merged: Vec<CanonicalRecord> =
        groups.iter().map(|group| merge_group(records, group)).collect();

    let mut group_of: HashMap<RecordId, usize> = HashMap::new();
    for (index, group) in groups.iter().enumerate() {
        for id in &group.members {
            group_of.insert(*id, index);
        }
    }

    let mut output = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let id = RecordId(i);
        match group_of.get(&id) {
            // Representative position: emit the canonical record.
            Some(&g) if groups[g].members[0] == id => output.push(merged[g].record.clone()),
            // Folded into its cluster's canonical record.
            Some(_) => {}
            None => output.push(record.clone()),
        }
    }

    let summary = compute_summary(records.len(), &pairs, &groups, output.len());
    let meta = DedupMeta {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        run_at: chrono::Utc::now().to_rfc3339(),
        name_threshold: options.name_threshold,
        phone_match: options.phone_match,
    };

    Ok(DedupOutcome { records: output, pairs, merged, summary, meta })
}
