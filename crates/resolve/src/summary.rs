use crate::model::{DedupSummary, DuplicatePair, MergeGroup};

/// Compute run counts from the intermediate results.
pub fn compute_summary(
    input_records: usize,
    pairs: &[DuplicatePair],
    groups: &[MergeGroup],
    output_records: usize,
) -> DedupSummary {
    let merged_away = groups.iter().map(|g| g.members.len() - 1).sum();
    DedupSummary {
        input_records,
        duplicate_pairs: pairs.len(),
        merge_groups: groups.len(),
        merged_away,
        output_records,
    }
}
