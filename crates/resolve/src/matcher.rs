//! Pairwise duplicate detection.
//!
//! Every unordered pair is compared exactly once — O(n²), a deliberate
//! simplicity tradeoff for personal-contact-list sizes. Absent or empty
//! fields contribute no evidence; they are never treated as a mismatch.

use crate::config::MatchOptions;
use crate::model::{ContactRecord, DuplicatePair, MatchEvidence, RecordId};
use crate::normalize::IdentityKey;
use crate::similarity::similarity_ratio;

/// Find all record pairs with at least one fired evidence signal.
pub fn find_duplicates(records: &[ContactRecord], options: &MatchOptions) -> Vec<DuplicatePair> {
    let keys: Vec<IdentityKey> = records.iter().map(IdentityKey::project).collect();

    let mut pairs = Vec::new();
    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let evidence = compare(&keys[i], &keys[j], options);
            if !evidence.is_empty() {
                pairs.push(DuplicatePair {
                    a: RecordId(i),
                    b: RecordId(j),
                    evidence,
                });
            }
        }
    }
    pairs
}

/// Evaluate the three signals independently and accumulate all that fire,
/// in phone, name, email order.
fn compare(a: &IdentityKey, b: &IdentityKey, options: &MatchOptions) -> Vec<MatchEvidence> {
    let mut evidence = Vec::new();

    if options.phone_match {
        let shared: Vec<String> = a.phones.intersection(&b.phones).cloned().collect();
        if !shared.is_empty() {
            evidence.push(MatchEvidence::SamePhone { shared });
        }
    }

    if !a.name.is_empty() && !b.name.is_empty() {
        let ratio = similarity_ratio(&a.name, &b.name);
        if ratio >= options.name_threshold {
            evidence.push(MatchEvidence::SimilarName { ratio });
        }
    }

    let shared: Vec<String> = a.emails.intersection(&b.emails).cloned().collect();
    if !shared.is_empty() {
        evidence.push(MatchEvidence::SameEmail { shared });
    }

    evidence
}
