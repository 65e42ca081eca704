//! Cross-store reconciliation: which source records have no corresponding
//! identity in the target store.
//!
//! One-directional set membership, not clustering — only exact normalized
//! equality counts, never thresholded name similarity. A single shared
//! identifier anywhere is enough to consider a record present.

use std::collections::HashSet;

use crate::model::ContactRecord;
use crate::normalize::IdentityKey;

/// Identity indexes over a target store, built once per reconciliation.
/// Empty strings are not identifiers and never enter an index.
#[derive(Debug, Default)]
pub struct TargetIndex {
    phones: HashSet<String>,
    names: HashSet<String>,
    emails: HashSet<String>,
}

impl TargetIndex {
    pub fn build(target: &[ContactRecord]) -> Self {
        let mut index = Self::default();
        for record in target {
            let key = IdentityKey::project(record);
            index.phones.extend(key.phones);
            if !key.name.is_empty() {
                index.names.insert(key.name);
            }
            index.emails.extend(key.emails);
        }
        index
    }

    /// Whether any of the record's identifiers appears in the target.
    pub fn contains(&self, record: &ContactRecord) -> bool {
        let key = IdentityKey::project(record);
        key.phones.iter().any(|p| self.phones.contains(p))
            || (!key.name.is_empty() && self.names.contains(&key.name))
            || key.emails.iter().any(|e| self.emails.contains(e))
    }
}

/// Source records with no identity match in the target store.
pub fn find_missing(source: &[ContactRecord], target: &[ContactRecord]) -> Vec<ContactRecord> {
    let index = TargetIndex::build(target);
    source
        .iter()
        .filter(|record| !index.contains(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phone: &str, email: &str) -> ContactRecord {
        ContactRecord {
            display_name: name.into(),
            phones: if phone.is_empty() { vec![] } else { vec![phone.into()] },
            emails: if email.is_empty() { vec![] } else { vec![email.into()] },
            ..Default::default()
        }
    }

    #[test]
    fn shared_email_means_present() {
        let source = vec![contact("X", "", "a@x.com")];
        let target = vec![contact("Y", "", "a@x.com")];
        assert!(find_missing(&source, &target).is_empty());
    }

    #[test]
    fn empty_target_reports_all_missing() {
        let source = vec![contact("X", "1234", "")];
        let missing = find_missing(&source, &[]);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].display_name, "X");
    }

    #[test]
    fn phone_membership_uses_normalized_forms() {
        let source = vec![contact("X", "+1 (555) 123-4567", "")];
        let target = vec![contact("Different Name", "555.123.4567", "")];
        assert!(find_missing(&source, &target).is_empty());
    }

    #[test]
    fn name_membership_is_exact_not_similar() {
        // "jon smith" vs "jonathan smith" would pass a 0.7 threshold, but
        // reconciliation only accepts exact normalized equality.
        let source = vec![contact("Jon Smith", "", "")];
        let target = vec![contact("Jonathan Smith", "", "")];
        assert_eq!(find_missing(&source, &target).len(), 1);

        let target_exact = vec![contact("  JON   smith ", "", "")];
        assert!(find_missing(&source, &target_exact).is_empty());
    }

    #[test]
    fn any_single_identifier_suffices() {
        let source = vec![contact("Completely Different", "555-000-1111", "z@z.org")];
        let target = vec![contact("Someone Else", "", "z@z.org")];
        assert!(find_missing(&source, &target).is_empty());
    }

    #[test]
    fn empty_identifiers_never_match() {
        // A record with no identifiers is missing even when the target also
        // contains identifier-less records.
        let source = vec![ContactRecord::default()];
        let target = vec![ContactRecord::default()];
        assert_eq!(find_missing(&source, &target).len(), 1);
    }

    #[test]
    fn result_preserves_source_order() {
        let source = vec![
            contact("A", "", "a@x.com"),
            contact("B", "", "b@x.com"),
            contact("C", "", "c@x.com"),
        ];
        let target = vec![contact("T", "", "b@x.com")];
        let missing = find_missing(&source, &target);
        let names: Vec<&str> = missing.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
