//! Deterministic merge of a duplicate cluster into one canonical record.
//!
//! The pairwise rule is folded left-to-right over the group's members in
//! arena order. Merge is a pure construction: inputs are never mutated, and
//! it is total over any two well-formed records, empty fields included.

use std::collections::HashSet;

use crate::model::{Address, CanonicalRecord, ContactRecord, MergeGroup};
use crate::normalize::normalize_phone;

/// Non-empty preference: `a` when it has content, else `b`.
fn pick_non_empty(a: &str, b: &str) -> String {
    if a.is_empty() { b.to_string() } else { a.to_string() }
}

/// Merge two records field by field under the precedence rules.
pub fn merge_pair(a: &ContactRecord, b: &ContactRecord) -> ContactRecord {
    // Longer display name wins, ties favor a.
    let display_name = if b.display_name.len() > a.display_name.len() {
        b.display_name.clone()
    } else {
        a.display_name.clone()
    };

    // Phones: first occurrence per normalized key, raw form kept.
    let mut seen_phones = HashSet::new();
    let mut phones = Vec::new();
    for phone in a.phones.iter().chain(&b.phones) {
        if seen_phones.insert(normalize_phone(phone)) {
            phones.push(phone.clone());
        }
    }

    // Emails: first occurrence per lower-cased value, raw casing kept.
    let mut seen_emails = HashSet::new();
    let mut emails = Vec::new();
    for email in a.emails.iter().chain(&b.emails) {
        if seen_emails.insert(email.to_lowercase()) {
            emails.push(email.clone());
        }
    }

    let organization = if !a.organization.is_empty() && !b.organization.is_empty() {
        if b.organization.len() > a.organization.len() {
            b.organization.clone()
        } else {
            a.organization.clone()
        }
    } else {
        pick_non_empty(&a.organization, &b.organization)
    };

    let note = match (a.note.is_empty(), b.note.is_empty()) {
        (true, _) => b.note.clone(),
        (false, true) => a.note.clone(),
        (false, false) if a.note == b.note => a.note.clone(),
        (false, false) => format!("{}\n---\n{}", a.note, b.note),
    };

    // Addresses: first occurrence per structural value.
    let mut seen_addresses = HashSet::new();
    let mut addresses: Vec<Address> = Vec::new();
    for address in a.addresses.iter().chain(&b.addresses) {
        if seen_addresses.insert(address.value.clone()) {
            addresses.push(address.clone());
        }
    }

    ContactRecord {
        display_name,
        given_name: pick_non_empty(&a.given_name, &b.given_name),
        family_name: pick_non_empty(&a.family_name, &b.family_name),
        phones,
        emails,
        organization,
        note,
        addresses,
        photo: a.photo.clone().or_else(|| b.photo.clone()),
        // A merged record has no single original form; it is re-synthesized
        // on export.
        source: None,
    }
}

/// Fold a group into one canonical record, accumulating provenance.
pub fn merge_group(records: &[ContactRecord], group: &MergeGroup) -> CanonicalRecord {
    let first = &records[group.members[0].0];
    let mut merged = first.clone();
    let mut merged_from = vec![first.display_name.clone()];

    for id in &group.members[1..] {
        let next = &records[id.0];
        merged = merge_pair(&merged, next);
        merged_from.push(next.display_name.clone());
    }

    CanonicalRecord { record: merged, merged_from }
}
