//! `cardsync merge` — auto-merge duplicates into a master contacts file.

use std::path::PathBuf;

use serde::Serialize;

use cardsync_io::vcard::synthesize_vcards;
use cardsync_resolve::config::MatchOptions;
use cardsync_resolve::engine::dedupe;
use cardsync_resolve::model::{DedupMeta, DedupSummary};

use crate::report::merge_log_report;
use crate::util::{ensure_output_dir, load_stores, write_output};
use crate::CliError;

#[derive(Serialize)]
struct MergeDocument<'a> {
    meta: &'a DedupMeta,
    summary: &'a DedupSummary,
    merge_log: &'a [String],
}

pub fn cmd_merge(
    files: Vec<PathBuf>,
    name_threshold: f64,
    no_phone_match: bool,
    output_dir: PathBuf,
    json: bool,
) -> Result<(), CliError> {
    let options = MatchOptions {
        name_threshold,
        phone_match: !no_phone_match,
    };

    let (records, _labels) = load_stores(&files)?;
    let outcome = dedupe(&records, &options).map_err(|e| CliError::usage(e.to_string()))?;
    let merge_log = outcome.merge_log();

    eprintln!(
        "merged {} contacts into {} ({} merge operations, {} records folded away)",
        outcome.summary.input_records,
        outcome.summary.output_records,
        outcome.summary.merge_groups,
        outcome.summary.merged_away,
    );

    ensure_output_dir(&output_dir)?;

    // The master file is fully re-synthesized: merged records have no single
    // original card, so none are re-emitted verbatim.
    write_output(
        &output_dir.join("master_contacts.vcf"),
        &synthesize_vcards(&outcome.records),
    )?;
    write_output(
        &output_dir.join("merge_log.txt"),
        &merge_log_report(&outcome.summary, &merge_log),
    )?;

    if json {
        let document = MergeDocument {
            meta: &outcome.meta,
            summary: &outcome.summary,
            merge_log: &merge_log,
        };
        let json_str = serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::parse(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    Ok(())
}
