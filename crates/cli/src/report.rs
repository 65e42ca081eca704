//! Human-readable report bodies. The CLI writes these next to the vCard
//! outputs so runs can be reviewed before anything is imported anywhere.

use cardsync_resolve::exclude::Exclusion;
use cardsync_resolve::model::{ContactRecord, DedupSummary, DuplicatePair};

const RULE: &str = "================================================================================";
const DASH: &str = "--------------------------------------------------------------------------------";

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

fn contact_block(out: &mut String, heading: &str, label: &str, record: &ContactRecord) {
    out.push_str(&format!("\n{heading}:\n"));
    out.push_str(&format!("  Name: {}\n", record.display_name));
    out.push_str(&format!("  Source: {label}\n"));
    out.push_str(&format!("  Phones: {}\n", list_or_none(&record.phones)));
    out.push_str(&format!("  Emails: {}\n", list_or_none(&record.emails)));
    let organization = if record.organization.is_empty() {
        "None"
    } else {
        record.organization.as_str()
    };
    out.push_str(&format!("  Organization: {organization}\n"));
}

/// Pairwise duplicate report: one block per pair with both contacts and the
/// evidence reason.
pub fn duplicate_report(
    records: &[ContactRecord],
    labels: &[String],
    pairs: &[DuplicatePair],
) -> String {
    let mut out = String::new();
    out.push_str("Duplicate Contact Report\n");
    out.push_str(&format!("Generated: {}\n", timestamp()));
    out.push_str(&format!("Total duplicate pairs found: {}\n", pairs.len()));
    out.push_str(RULE);
    out.push_str("\n\n");

    for (i, pair) in pairs.iter().enumerate() {
        out.push_str(&format!("Duplicate #{}\n", i + 1));
        out.push_str(&format!("Reason: {}\n", pair.reason()));
        contact_block(&mut out, "Contact A", &labels[pair.a.0], &records[pair.a.0]);
        contact_block(&mut out, "Contact B", &labels[pair.b.0], &records[pair.b.0]);
        out.push('\n');
        out.push_str(DASH);
        out.push_str("\n\n");
    }

    out
}

/// Missing contacts report: numbered list with whatever identity material
/// each record has.
pub fn missing_report(missing: &[ContactRecord], source: &str, target: &str) -> String {
    let mut out = String::new();
    out.push_str("Missing Contacts Report\n");
    out.push_str(&format!("Generated: {}\n", timestamp()));
    out.push_str(&format!("Source store: {source}\n"));
    out.push_str(&format!("Target store: {target}\n"));
    out.push_str(&format!("Total contacts missing from target: {}\n", missing.len()));
    out.push_str(RULE);
    out.push_str("\n\n");

    for (i, record) in missing.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, record.display_name));
        if !record.phones.is_empty() {
            out.push_str(&format!("   Phones: {}\n", record.phones.join(", ")));
        }
        if !record.emails.is_empty() {
            out.push_str(&format!("   Emails: {}\n", record.emails.join(", ")));
        }
        if !record.organization.is_empty() {
            out.push_str(&format!("   Organization: {}\n", record.organization));
        }
        out.push('\n');
    }

    out
}

/// Merge log: run counts followed by one line per merge operation.
pub fn merge_log_report(summary: &DedupSummary, merge_log: &[String]) -> String {
    let mut out = String::new();
    out.push_str("Contact Merge Log\n");
    out.push_str(&format!("Generated: {}\n", timestamp()));
    out.push_str(&format!("Total contacts before: {}\n", summary.input_records));
    out.push_str(&format!("Total contacts after: {}\n", summary.output_records));
    out.push_str(&format!("Merge operations: {}\n", summary.merge_groups));
    out.push_str(RULE);
    out.push_str("\n\n");

    for line in merge_log {
        out.push_str(line);
        out.push('\n');
    }

    out
}

/// Exclusion report: counts, then each excluded contact with its reason.
pub fn exclusion_report(
    input: &str,
    rules_file: &str,
    total: usize,
    kept: usize,
    excluded: &[(ContactRecord, Exclusion)],
) -> String {
    let mut out = String::new();
    out.push_str("Contact Exclusion Report\n");
    out.push_str(&format!("Generated: {}\n", timestamp()));
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("Input file: {input}\n"));
    out.push_str(&format!("Rules file: {rules_file}\n\n"));
    out.push_str(&format!("Total contacts: {total}\n"));
    out.push_str(&format!("Kept: {kept}\n"));
    out.push_str(&format!("Excluded: {}\n\n", excluded.len()));
    out.push_str("Excluded contacts:\n");
    out.push_str(DASH);
    out.push_str("\n\n");

    for (i, (record, exclusion)) in excluded.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, record.display_name));
        out.push_str(&format!("   Reason: {exclusion}\n"));
        if !record.emails.is_empty() {
            out.push_str(&format!("   Emails: {}\n", record.emails.join(", ")));
        }
        if !record.phones.is_empty() {
            out.push_str(&format!("   Phones: {}\n", record.phones.join(", ")));
        }
        if !record.organization.is_empty() {
            out.push_str(&format!("   Organization: {}\n", record.organization));
        }
        out.push('\n');
    }

    out
}
