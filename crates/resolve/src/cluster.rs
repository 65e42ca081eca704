//! Transitive clustering of duplicate pairs.
//!
//! Union-find over record identities: processing a pair unions the sets
//! containing its two records, so A≈B and B≈C place {A, B, C} in one group
//! even when A and C were never directly evidenced. The final partition is a
//! pure function of the pair set — edge order never changes membership.

use std::collections::{BTreeMap, HashMap};

use crate::model::{DuplicatePair, MergeGroup, RecordId};

/// Disjoint-set forest keyed by `RecordId`, with path compression. Records
/// enter the structure only when first referenced by a pair.
#[derive(Debug, Default)]
pub struct UnionFind {
    parent: HashMap<RecordId, RecordId>,
    rank: HashMap<RecordId, u32>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Representative of `id`'s set, creating a singleton on first sight.
    pub fn find(&mut self, id: RecordId) -> RecordId {
        let mut root = *self.parent.entry(id).or_insert(id);
        while self.parent[&root] != root {
            root = self.parent[&root];
        }
        // Compress the walked path.
        let mut cur = id;
        while self.parent[&cur] != root {
            let next = self.parent[&cur];
            self.parent.insert(cur, root);
            cur = next;
        }
        root
    }

    /// Union the sets containing `a` and `b`. Idempotent: safe when the two
    /// are already in the same set.
    pub fn union(&mut self, a: RecordId, b: RecordId) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let rank_a = *self.rank.get(&ra).unwrap_or(&0);
        let rank_b = *self.rank.get(&rb).unwrap_or(&0);
        if rank_a < rank_b {
            self.parent.insert(ra, rb);
        } else if rank_a > rank_b {
            self.parent.insert(rb, ra);
        } else {
            self.parent.insert(rb, ra);
            self.rank.insert(ra, rank_a + 1);
        }
    }

    /// All ids ever referenced, in arena order.
    fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.parent.keys().copied().collect();
        ids.sort();
        ids
    }
}

/// Build the connected components of the pair list. Groups are keyed by
/// their lowest member and returned in that order; members are sorted by
/// arena index. Records mentioned in no pair never appear.
pub fn build_clusters(pairs: &[DuplicatePair]) -> Vec<MergeGroup> {
    let mut uf = UnionFind::new();
    for pair in pairs {
        uf.union(pair.a, pair.b);
    }

    let mut by_root: HashMap<RecordId, Vec<RecordId>> = HashMap::new();
    for id in uf.ids() {
        let root = uf.find(id);
        by_root.entry(root).or_default().push(id);
    }

    // Re-key by lowest member so output ordering is independent of which
    // internal root each union happened to leave in place.
    let mut groups: BTreeMap<RecordId, Vec<RecordId>> = BTreeMap::new();
    for (_, mut members) in by_root {
        members.sort();
        groups.insert(members[0], members);
    }

    groups
        .into_values()
        .map(|members| MergeGroup { members })
        .collect()
}
