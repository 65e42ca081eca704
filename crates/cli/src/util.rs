use std::path::{Path, PathBuf};

use cardsync_io::vcard::parse_vcard_file;
use cardsync_resolve::ContactRecord;

use crate::CliError;

/// Short label for a store in reports: the file stem.
pub fn store_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a vCard export, warning about unrecoverable cards.
pub fn load_contacts(path: &Path) -> Result<Vec<ContactRecord>, CliError> {
    let outcome = parse_vcard_file(path)
        .map_err(|e| CliError::parse(format!("cannot read {}: {e}", path.display())))?;
    if outcome.skipped > 0 {
        eprintln!(
            "warning: skipped {} malformed card(s) in {}",
            outcome.skipped,
            path.display()
        );
    }
    eprintln!("{}: {} contacts", path.display(), outcome.contacts.len());
    Ok(outcome.contacts)
}

/// Load several exports into one arena, remembering each record's store.
pub fn load_stores(files: &[PathBuf]) -> Result<(Vec<ContactRecord>, Vec<String>), CliError> {
    let mut records = Vec::new();
    let mut labels = Vec::new();
    for path in files {
        let label = store_label(path);
        let contacts = load_contacts(path)?;
        labels.extend(std::iter::repeat(label).take(contacts.len()));
        records.extend(contacts);
    }
    Ok((records, labels))
}

pub fn ensure_output_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::parse(format!("cannot create {}: {e}", dir.display())))
}

pub fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    std::fs::write(path, content)
        .map_err(|e| CliError::parse(format!("cannot write {}: {e}", path.display())))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
