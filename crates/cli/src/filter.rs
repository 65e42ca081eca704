//! `cardsync filter` — apply exclusion rules to a contacts file.

use std::path::{Path, PathBuf};

use cardsync_io::vcard::write_vcards;
use cardsync_resolve::config::ExclusionRules;
use cardsync_resolve::exclude::filter_records;

use crate::exit_codes::EXIT_CONFIG;
use crate::report::exclusion_report;
use crate::util::{ensure_output_dir, load_contacts, write_output};
use crate::CliError;

/// A missing rules file degrades to the empty rule set; a present but
/// malformed one is an error.
fn load_rules(path: &Path) -> Result<ExclusionRules, CliError> {
    match std::fs::read_to_string(path) {
        Ok(content) => ExclusionRules::from_toml(&content).map_err(|e| CliError {
            code: EXIT_CONFIG,
            message: format!("{}: {e}", path.display()),
            hint: None,
        }),
        Err(_) => {
            eprintln!(
                "warning: rules file {} not found, no contacts will be excluded",
                path.display()
            );
            Ok(ExclusionRules::default())
        }
    }
}

pub fn cmd_filter(
    input: PathBuf,
    rules_path: PathBuf,
    output_dir: PathBuf,
) -> Result<(), CliError> {
    let rules = load_rules(&rules_path)?;
    eprintln!("{} active exclusion rule(s)", rules.active_rule_count());

    let contacts = load_contacts(&input)?;
    let outcome = filter_records(&contacts, &rules);
    eprintln!(
        "kept {} contacts, excluded {}",
        outcome.kept.len(),
        outcome.excluded.len()
    );

    if outcome.excluded.is_empty() {
        eprintln!("no contacts were excluded; output matches input");
        return Ok(());
    }

    ensure_output_dir(&output_dir)?;
    write_output(
        &output_dir.join("filtered_contacts.vcf"),
        &write_vcards(&outcome.kept),
    )?;
    // Excluded cards are exported too, for review before deleting anything.
    write_output(
        &output_dir.join("excluded_contacts.vcf"),
        &write_vcards(&outcome.excluded.iter().map(|(r, _)| r.clone()).collect::<Vec<_>>()),
    )?;
    write_output(
        &output_dir.join("exclusion_report.txt"),
        &exclusion_report(
            &input.display().to_string(),
            &rules_path.display().to_string(),
            contacts.len(),
            outcome.kept.len(),
            &outcome.excluded,
        ),
    )?;

    Ok(())
}
