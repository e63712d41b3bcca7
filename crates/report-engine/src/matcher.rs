//! Fuzzy phrase location over token sequences.
//!
//! Similarity is the longest-matching-blocks ratio: repeatedly take the
//! longest common contiguous character block, recurse on the remainders on
//! both sides, and score 2 x matched / (len(a) + len(b)). Criteria thresholds
//! were tuned against this exact ratio, so an edit-distance metric is not a
//! drop-in replacement here.

use std::collections::HashMap;

/// Threshold requiring a character-for-character match.
pub const EXACT: f64 = 1.0;

/// Longest-matching-blocks similarity between two strings, in [0.0, 1.0].
///
/// Two empty strings compare as identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let combined = a.len() + b.len();
    if combined == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / combined as f64
}

/// Total length of all matching blocks between `a` and `b`.
fn matched_len(a: &[char], b: &[char]) -> usize {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b_positions.entry(c).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_block(a, &b_positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest common contiguous block within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long blocks the one starting earliest in `a`, then earliest
/// in `b`, wins. Ratio totals depend on this tie-break, so it is fixed.
fn longest_block(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run_ends[j] = length of the common run ending at (i - 1, j - 1)
    let mut run_ends: HashMap<usize, usize> = HashMap::new();
    for (i, &c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run_ends = HashMap::new();
        if let Some(positions) = b_positions.get(&c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j == 0 {
                    0
                } else {
                    run_ends.get(&(j - 1)).copied().unwrap_or(0)
                };
                let size = prev + 1;
                next_run_ends.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_ends = next_run_ends;
    }
    (best_i, best_j, best_size)
}

/// Locate a token phrase inside a token sequence by fuzzy window matching.
///
/// Scans windows of `haystack[start..end)` (`end` defaults to the haystack
/// length), comparing the window's concatenated text against the needle's.
/// Window lengths are tried ascending from 1 up to the needle length, and
/// start positions ascending within each length, so the first hit is the
/// shortest, then leftmost, window reaching `compliance`. Returns the window
/// start index, or `None`. An empty needle is never found.
pub fn find_phrase(
    haystack: &[String],
    needle: &[String],
    start: usize,
    end: Option<usize>,
    compliance: f64,
) -> Option<usize> {
    let end = end.unwrap_or(haystack.len()).min(haystack.len());
    let target = needle.concat();
    for width in 1..=needle.len() {
        let mut pos = start;
        while pos + width <= end {
            let window = haystack[pos..pos + width].concat();
            if sequence_ratio(&target, &window) >= compliance {
                return Some(pos);
            }
            pos += 1;
        }
    }
    None
}
