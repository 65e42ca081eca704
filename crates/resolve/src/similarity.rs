//! Ratcliff/Obershelp string similarity.
//!
//! `ratio = 2·M / T`, where M is the total character count of the recursively
//! matched longest common contiguous blocks and T is the combined length of
//! both strings. Case-insensitive; identical strings score 1.0, disjoint
//! strings 0.0.

use std::collections::HashMap;

/// Similarity ratio in `[0, 1]` between two strings.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matched_chars(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Total size of all matching blocks: find the longest common block, then
/// recurse into the unmatched regions on each side of it.
fn matched_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
    if size == 0 {
        return 0;
    }
    size + matched_chars(a, b, alo, i, blo, j) + matched_chars(a, b, i + size, ahi, j + size, bhi)
}

/// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`, preferring
/// the earliest position in `a`, then in `b`.
///
/// `j2len[j]` holds the length of the longest match ending at `(i, j)`;
/// advancing `i` rebuilds it from the previous row.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0usize);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut row: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if b[j] != a[i] {
                continue;
            }
            let len = if j > blo {
                j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
            } else {
                1
            };
            row.insert(j, len);
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        j2len = row;
    }

    best
}
