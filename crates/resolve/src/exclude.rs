//! Rule evaluation for dropping records from final output.
//!
//! The keep-override is checked first and short-circuits; otherwise the
//! exclusion categories run in a fixed order and the first match wins,
//! carrying its category and matched term as the reason.

use serde::Serialize;

use crate::config::ExclusionRules;
use crate::model::ContactRecord;
use crate::normalize::strip_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionCategory {
    EmailDomain,
    Email,
    Organization,
    PhonePrefix,
    NamePattern,
}

impl std::fmt::Display for ExclusionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailDomain => write!(f, "Email domain"),
            Self::Email => write!(f, "Email"),
            Self::Organization => write!(f, "Organization"),
            Self::PhonePrefix => write!(f, "Phone prefix"),
            Self::NamePattern => write!(f, "Name pattern"),
        }
    }
}

/// Why a record was dropped: the category and the rule term that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub category: ExclusionCategory,
    pub term: String,
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.category, self.term)
    }
}

/// Evaluate the rules against one record. `None` means keep.
pub fn should_exclude(record: &ContactRecord, rules: &ExclusionRules) -> Option<Exclusion> {
    // Keep-override: any phrase found in the note keeps the record
    // unconditionally.
    if !record.note.is_empty() {
        let note = record.note.to_lowercase();
        for phrase in &rules.keep_if_note_contains {
            if !phrase.is_empty() && note.contains(&phrase.to_lowercase()) {
                return None;
            }
        }
    }

    // Email domain substrings.
    for email in &record.emails {
        let email = email.to_lowercase();
        for domain in &rules.exclude_email_domains {
            if !domain.is_empty() && email.contains(&domain.to_lowercase()) {
                return Some(Exclusion {
                    category: ExclusionCategory::EmailDomain,
                    term: domain.clone(),
                });
            }
        }
    }

    // Exact emails.
    for email in &record.emails {
        for excluded in &rules.exclude_emails {
            if !excluded.is_empty() && email.to_lowercase() == excluded.to_lowercase() {
                return Some(Exclusion {
                    category: ExclusionCategory::Email,
                    term: excluded.clone(),
                });
            }
        }
    }

    // Organization substrings.
    if !record.organization.is_empty() {
        let organization = record.organization.to_lowercase();
        for term in &rules.exclude_organizations {
            if !term.is_empty() && organization.contains(&term.to_lowercase()) {
                return Some(Exclusion {
                    category: ExclusionCategory::Organization,
                    term: term.clone(),
                });
            }
        }
    }

    // Phone prefixes: both sides digit-stripped, no country-code stripping.
    for phone in &record.phones {
        let digits = strip_phone(phone);
        for prefix in &rules.exclude_phone_prefixes {
            let prefix_digits = strip_phone(prefix);
            if !prefix_digits.is_empty() && digits.starts_with(&prefix_digits) {
                return Some(Exclusion {
                    category: ExclusionCategory::PhonePrefix,
                    term: prefix.clone(),
                });
            }
        }
    }

    // Name patterns, substring over the display name.
    if !record.display_name.is_empty() {
        let name = record.display_name.to_lowercase();
        for pattern in &rules.exclude_name_patterns {
            if !pattern.is_empty() && name.contains(&pattern.to_lowercase()) {
                return Some(Exclusion {
                    category: ExclusionCategory::NamePattern,
                    term: pattern.clone(),
                });
            }
        }
    }

    None
}

#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub kept: Vec<ContactRecord>,
    pub excluded: Vec<(ContactRecord, Exclusion)>,
}

/// Partition records into kept and excluded, preserving input order.
pub fn filter_records(records: &[ContactRecord], rules: &ExclusionRules) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    for record in records {
        match should_exclude(record, rules) {
            Some(exclusion) => outcome.excluded.push((record.clone(), exclusion)),
            None => outcome.kept.push(record.clone()),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ExclusionRules {
        ExclusionRules {
            exclude_email_domains: vec!["noreply".into(), "@spam.example".into()],
            exclude_emails: vec!["old@example.com".into()],
            exclude_organizations: vec!["Recruiting".into()],
            exclude_phone_prefixes: vec!["+1 555".into()],
            exclude_name_patterns: vec!["support".into()],
            keep_if_note_contains: vec!["keep".into()],
        }
    }

    fn record() -> ContactRecord {
        ContactRecord { display_name: "Jon Smith".into(), ..Default::default() }
    }

    #[test]
    fn keep_override_short_circuits_all_rules() {
        let mut r = record();
        r.organization = "Acme Recruiting".into();
        r.note = "KEEP this one, met at wedding".into();
        assert_eq!(should_exclude(&r, &rules()), None);
    }

    #[test]
    fn email_domain_substring_matches() {
        let mut r = record();
        r.emails = vec!["no-reply@x.com".into(), "updates@NoReply.example".into()];
        let exclusion = should_exclude(&r, &rules()).unwrap();
        assert_eq!(exclusion.category, ExclusionCategory::EmailDomain);
        assert_eq!(exclusion.term, "noreply");
        assert_eq!(exclusion.to_string(), "Email domain: noreply");
    }

    #[test]
    fn exact_email_case_insensitive() {
        let mut r = record();
        r.emails = vec!["OLD@Example.Com".into()];
        let exclusion = should_exclude(&r, &rules()).unwrap();
        assert_eq!(exclusion.category, ExclusionCategory::Email);
    }

    #[test]
    fn category_order_first_match_wins() {
        // Qualifies under both email-domain and organization; the fixed
        // category order makes email-domain the reported reason.
        let mut r = record();
        r.emails = vec!["news@spam.example".into()];
        r.organization = "Big Recruiting Inc".into();
        let exclusion = should_exclude(&r, &rules()).unwrap();
        assert_eq!(exclusion.category, ExclusionCategory::EmailDomain);
    }

    #[test]
    fn phone_prefix_compares_stripped_digits() {
        let mut r = record();
        r.phones = vec!["(555) 010-2030".into()];
        // "+1 555" strips to "+1555"; "5550102030" does not start with it.
        assert_eq!(should_exclude(&r, &rules()), None);

        r.phones = vec!["+1 (555) 010-2030".into()];
        let exclusion = should_exclude(&r, &rules()).unwrap();
        assert_eq!(exclusion.category, ExclusionCategory::PhonePrefix);
        assert_eq!(exclusion.term, "+1 555");
    }

    #[test]
    fn name_pattern_substring_case_insensitive() {
        let mut r = record();
        r.display_name = "Acme SUPPORT Line".into();
        let exclusion = should_exclude(&r, &rules()).unwrap();
        assert_eq!(exclusion.category, ExclusionCategory::NamePattern);
    }

    #[test]
    fn empty_rules_keep_everything() {
        let mut r = record();
        r.emails = vec!["old@example.com".into()];
        assert_eq!(should_exclude(&r, &ExclusionRules::default()), None);
    }

    #[test]
    fn empty_terms_are_inert() {
        let rules = ExclusionRules {
            exclude_name_patterns: vec!["".into()],
            exclude_phone_prefixes: vec!["-".into()],
            ..Default::default()
        };
        let mut r = record();
        r.phones = vec!["555-123-4567".into()];
        assert_eq!(should_exclude(&r, &rules), None);
    }

    #[test]
    fn filter_partitions_in_order() {
        let mut drop_me = record();
        drop_me.emails = vec!["old@example.com".into()];
        let records = vec![record(), drop_me, record()];

        let outcome = filter_records(&records, &rules());
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.excluded.len(), 1);
        assert_eq!(outcome.excluded[0].1.to_string(), "Email: old@example.com");
    }
}
