//! `cardsync dupes` — duplicate detection across one or more exports.

use std::path::PathBuf;

use serde::Serialize;

use cardsync_resolve::config::MatchOptions;
use cardsync_resolve::matcher::find_duplicates;
use cardsync_resolve::model::{ContactRecord, DuplicatePair};

use crate::exit_codes::EXIT_FINDINGS;
use crate::report::duplicate_report;
use crate::util::{ensure_output_dir, load_stores, write_output};
use crate::CliError;

#[derive(Serialize)]
struct DupesDocument<'a> {
    name_threshold: f64,
    phone_match: bool,
    pairs: Vec<PairEntry<'a>>,
}

#[derive(Serialize)]
struct PairEntry<'a> {
    a_name: &'a str,
    a_source: &'a str,
    b_name: &'a str,
    b_source: &'a str,
    reason: String,
    #[serde(flatten)]
    pair: &'a DuplicatePair,
}

pub fn cmd_dupes(
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
    options.validate().map_err(|e| CliError::usage(e.to_string()))?;

    let (records, labels) = load_stores(&files)?;
    let pairs = find_duplicates(&records, &options);
    eprintln!(
        "{} contacts scanned, {} duplicate pair(s) found",
        records.len(),
        pairs.len()
    );

    if json {
        let document = DupesDocument {
            name_threshold: options.name_threshold,
            phone_match: options.phone_match,
            pairs: pairs
                .iter()
                .map(|pair| pair_entry(&records, &labels, pair))
                .collect(),
        };
        let json_str = serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::parse(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if pairs.is_empty() {
        return Ok(());
    }

    ensure_output_dir(&output_dir)?;
    let report_path = output_dir.join("duplicate_report.txt");
    write_output(&report_path, &duplicate_report(&records, &labels, &pairs))?;

    Err(CliError {
        code: EXIT_FINDINGS,
        message: "duplicates found".into(),
        hint: Some(format!("review {}", report_path.display())),
    })
}

fn pair_entry<'a>(
    records: &'a [ContactRecord],
    labels: &'a [String],
    pair: &'a DuplicatePair,
) -> PairEntry<'a> {
    PairEntry {
        a_name: &records[pair.a.0].display_name,
        a_source: &labels[pair.a.0],
        b_name: &records[pair.b.0].display_name,
        b_source: &labels[pair.b.0],
        reason: pair.reason(),
        pair,
    }
}
