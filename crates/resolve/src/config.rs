use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

// ---------------------------------------------------------------------------
// Match options
// ---------------------------------------------------------------------------

/// Knobs for the pairwise matcher. The threshold also controls how eagerly
/// the transitive cluster builder over-merges; callers wanting conservative
/// auto-merge raise it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchOptions {
    /// Name similarity ratio in `[0, 1]` at or above which name evidence
    /// fires.
    pub name_threshold: f64,
    /// Whether shared normalized phone numbers count as evidence.
    pub phone_match: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { name_threshold: 0.85, phone_match: true }
    }
}

impl MatchOptions {
    pub fn validate(&self) -> Result<(), ResolveError> {
        if !(0.0..=1.0).contains(&self.name_threshold) {
            return Err(ResolveError::ThresholdOutOfRange(self.name_threshold));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Exclusion rules
// ---------------------------------------------------------------------------

/// Named term lists for the exclusion rule engine. Every key is optional in
/// the TOML document and defaults to an empty list; the empty rule set
/// excludes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExclusionRules {
    #[serde(default)]
    pub exclude_email_domains: Vec<String>,
    #[serde(default)]
    pub exclude_emails: Vec<String>,
    #[serde(default)]
    pub exclude_organizations: Vec<String>,
    #[serde(default)]
    pub exclude_phone_prefixes: Vec<String>,
    #[serde(default)]
    pub exclude_name_patterns: Vec<String>,
    #[serde(default)]
    pub keep_if_note_contains: Vec<String>,
}

impl ExclusionRules {
    pub fn from_toml(input: &str) -> Result<Self, ResolveError> {
        toml::from_str(input).map_err(|e| ResolveError::ConfigParse(e.to_string()))
    }

    /// Count of exclusion terms across all categories (the keep-override
    /// list is not an exclusion rule).
    pub fn active_rule_count(&self) -> usize {
        self.exclude_email_domains.len()
            + self.exclude_emails.len()
            + self.exclude_organizations.len()
            + self.exclude_phone_prefixes.len()
            + self.exclude_name_patterns.len()
    }
}
