//! Canonical forms for the comparable identity fields.
//!
//! Every function here is total and idempotent: irregular real-world export
//! data degrades to an empty or partial string, never an error.

use std::collections::BTreeSet;

use crate::model::ContactRecord;

/// Keep digits and a leading `+`, drop everything else. This is the shared
/// stripping step for both phone normalization and phone-prefix rules.
pub fn strip_phone(raw: &str) -> String {
    let mut out = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch == '+' && out.is_empty() {
            out.push('+');
        }
    }
    out
}

/// 11 digits starting with `1` is a NANP number with its trunk prefix.
fn drop_nanp_trunk(digits: &str) -> &str {
    if digits.len() == 11 && digits.starts_with('1') {
        &digits[1..]
    } else {
        digits
    }
}

/// Normalize a phone number for comparison.
///
/// Strips formatting, drops a NANP trunk `1`, and removes a `+`-prefixed
/// country code. The country code is assumed to span the digits in excess of
/// a 10-digit national number, clamped to 1–3. Inputs with no digits
/// normalize to the empty string.
pub fn normalize_phone(raw: &str) -> String {
    let stripped = strip_phone(raw);
    let n = drop_nanp_trunk(&stripped);

    match n.strip_prefix('+') {
        Some(rest) if rest.is_empty() => String::new(),
        Some(rest) => {
            let code = rest.len().saturating_sub(10).clamp(1, 3);
            drop_nanp_trunk(&rest[code..]).to_string()
        }
        None => n.to_string(),
    }
}

/// Normalized phone set for a record. Raw empties are skipped, and so are
/// numbers that normalize to nothing — an empty key is not an identifier.
pub fn normalized_phones(record: &ContactRecord) -> BTreeSet<String> {
    record
        .phones
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| normalize_phone(p))
        .filter(|n| !n.is_empty())
        .collect()
}

/// Normalized name for comparison: display name when present, otherwise
/// `"{given} {family}"`; lower-cased with whitespace runs collapsed.
pub fn normalized_name(record: &ContactRecord) -> String {
    let name = if record.display_name.is_empty() {
        format!("{} {}", record.given_name, record.family_name)
    } else {
        record.display_name.clone()
    };
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The comparable projection of one record, computed once so the O(n²)
/// matcher and the reconciler never re-normalize in inner loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityKey {
    pub phones: BTreeSet<String>,
    pub name: String,
    pub emails: BTreeSet<String>,
}

impl IdentityKey {
    pub fn project(record: &ContactRecord) -> Self {
        Self {
            phones: normalized_phones(record),
            name: normalized_name(record),
            emails: record
                .emails
                .iter()
                .filter(|e| !e.is_empty())
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }
}
