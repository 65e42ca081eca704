//! `cardsync-resolve` — identity resolution and merge engine for contacts.
//!
//! Pure engine crate: receives pre-loaded records, returns deduplicated
//! results. No CLI or IO dependencies.

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod exclude;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod similarity;
pub mod summary;

pub use config::{ExclusionRules, MatchOptions};
pub use engine::dedupe;
pub use error::ResolveError;
pub use exclude::{filter_records, should_exclude, FilterOutcome};
pub use matcher::find_duplicates;
pub use model::{CanonicalRecord, ContactRecord, DedupOutcome, DuplicatePair, RecordId};
pub use reconcile::find_missing;
