use serde::Serialize;

// ---------------------------------------------------------------------------
// Record identity
// ---------------------------------------------------------------------------

/// Stable handle for a record within one engine run.
///
/// Records carry no natural primary key across sources, so the engine assigns
/// each one its index in the caller's slice at load time. Pairs, groups, and
/// indexes reference this handle rather than structural equality, so two
/// field-for-field identical records remain distinct entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(pub usize);

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single contact as imported from one source.
///
/// Scalar fields are always present (possibly empty), sequences are never
/// null. `phones`/`emails` hold the raw imported forms; normalization happens
/// on demand in the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactRecord {
    pub display_name: String,
    pub given_name: String,
    pub family_name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub organization: String,
    pub note: String,
    pub addresses: Vec<Address>,
    pub photo: Option<Photo>,
    /// Original serialized form, used only when re-emitting. Opaque here.
    pub source: Option<SourceHandle>,
}

/// Opaque structured address, carried through untouched. The engine only
/// ever compares `value` (the structural form) when de-duplicating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Full property text as imported (parameters included).
    pub property: String,
    /// Structural value portion, the merge de-duplication key.
    pub value: String,
}

/// Opaque photo property, carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub property: String,
}

/// Reference to the record's original serialized form. Never inspected by
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle {
    pub raw: String,
}

// ---------------------------------------------------------------------------
// Duplicate evidence
// ---------------------------------------------------------------------------

/// One independently-evaluated basis for declaring two records duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "signal")]
pub enum MatchEvidence {
    SamePhone { shared: Vec<String> },
    SimilarName { ratio: f64 },
    SameEmail { shared: Vec<String> },
}

impl std::fmt::Display for MatchEvidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SamePhone { shared } => write!(f, "Same phone: {}", quoted_set(shared)),
            Self::SimilarName { ratio } => {
                write!(f, "Similar names: {:.0}% match", ratio * 100.0)
            }
            Self::SameEmail { shared } => write!(f, "Same email: {}", quoted_set(shared)),
        }
    }
}

/// `{'a', 'b'}` — the set rendering used in duplicate reports.
fn quoted_set(values: &[String]) -> String {
    let inner: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    format!("{{{}}}", inner.join(", "))
}

/// A pair of records with at least one fired evidence signal. Transient:
/// produced by the matcher, consumed by the cluster builder and reports.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicatePair {
    pub a: RecordId,
    pub b: RecordId,
    /// Fired signals, in phone, name, email order.
    pub evidence: Vec<MatchEvidence>,
}

impl DuplicatePair {
    /// Human-readable reason line, signals joined by `" | "`.
    pub fn reason(&self) -> String {
        let parts: Vec<String> = self.evidence.iter().map(|e| e.to_string()).collect();
        parts.join(" | ")
    }
}

// ---------------------------------------------------------------------------
// Clusters + canonical output
// ---------------------------------------------------------------------------

/// A set of records determined to denote one identity. Members are sorted by
/// arena index; the first member is the group's representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    pub members: Vec<RecordId>,
}

/// The merged representation chosen to stand in for a duplicate cluster,
/// with provenance for logging.
#[derive(Debug, Clone)]
pub struct CanonicalRecord {
    pub record: ContactRecord,
    /// Display names of the folded members, in fold order.
    pub merged_from: Vec<String>,
}

impl CanonicalRecord {
    /// `"Merged {k} contacts: {names joined by ' + '} -> {finalName}"`.
    pub fn log_line(&self) -> String {
        format!(
            "Merged {} contacts: {} -> {}",
            self.merged_from.len(),
            self.merged_from.join(" + "),
            self.record.display_name,
        )
    }
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DedupSummary {
    pub input_records: usize,
    pub duplicate_pairs: usize,
    pub merge_groups: usize,
    /// Records folded into another record (input − output).
    pub merged_away: usize,
    pub output_records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DedupMeta {
    pub engine_version: String,
    pub run_at: String,
    pub name_threshold: f64,
    pub phone_match: bool,
}

/// Everything a dedupe run produces. The deduplicated records are owned by
/// the caller; the engine holds no residual reference to its inputs.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Deduplicated list: each cluster's canonical record at the position of
    /// the cluster's lowest member, untouched records passed through.
    pub records: Vec<ContactRecord>,
    pub pairs: Vec<DuplicatePair>,
    pub merged: Vec<CanonicalRecord>,
    pub summary: DedupSummary,
    pub meta: DedupMeta,
}

impl DedupOutcome {
    /// One log line per merge, for the merge report.
    pub fn merge_log(&self) -> Vec<String> {
        self.merged.iter().map(CanonicalRecord::log_line).collect()
    }
}
