//! `cardsync missing` — one-directional reconciliation of two stores.

use std::path::PathBuf;

use cardsync_io::vcard::write_vcards;
use cardsync_resolve::reconcile::find_missing;

use crate::exit_codes::EXIT_FINDINGS;
use crate::report::missing_report;
use crate::util::{ensure_output_dir, load_contacts, store_label, write_output};
use crate::CliError;

pub fn cmd_missing(
    source: PathBuf,
    target: PathBuf,
    output_dir: PathBuf,
) -> Result<(), CliError> {
    let source_contacts = load_contacts(&source)?;
    let target_contacts = load_contacts(&target)?;

    let missing = find_missing(&source_contacts, &target_contacts);
    eprintln!(
        "{} of {} source contacts have no identity in the target",
        missing.len(),
        source_contacts.len()
    );

    if missing.is_empty() {
        return Ok(());
    }

    ensure_output_dir(&output_dir)?;
    let report_path = output_dir.join("missing_contacts_report.txt");
    write_output(
        &report_path,
        &missing_report(&missing, &store_label(&source), &store_label(&target)),
    )?;

    // Exported cards keep their original serialized form for re-import.
    let vcf_path = output_dir.join("missing_contacts.vcf");
    write_output(&vcf_path, &write_vcards(&missing))?;

    Err(CliError {
        code: EXIT_FINDINGS,
        message: "missing contacts found".into(),
        hint: Some(format!("import {}", vcf_path.display())),
    })
}
