//! Matching-block similarity for capability labels and course text.
//!
//! The ratio is `2*M / (|a| + |b|)` where `M` counts characters covered by
//! the matching blocks: the longest common run is taken first, then the
//! search recurses on the text left and right of it. Comparison is
//! case-insensitive and works on Unicode scalar values.

use std::collections::HashMap;

/// Sequences at least this long get the popular-element heuristic.
const POPULAR_MIN_LEN: usize = 200;

/// Compute the matching-block similarity of two strings.
///
/// Returns a value between 0.0 (nothing in common) and 1.0 (identical after
/// lower-casing). Two empty strings are identical.
pub fn compute_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// A run of equal elements: `a[a_start..a_start+len] == b[b_start..b_start+len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a_start: usize,
    b_start: usize,
    len: usize,
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each element of `b`, ascending; popular elements removed.
    b_index: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b_index.entry(*ch).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b_index }
    }

    /// Longest matching block inside `a[alo..ahi]` x `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
        // run length of the match ending at b[j], for the previous row of a
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_runs = HashMap::new();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = j
                        .checked_sub(1)
                        .and_then(|p| run_ending_at.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let len = prev + 1;
                    next_runs.insert(j, len);
                    if len > best_len {
                        best_i = i + 1 - len;
                        best_j = j + 1 - len;
                        best_len = len;
                    }
                }
            }
            run_ending_at = next_runs;
        }

        // Popular elements never seed a block but may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        Block {
            a_start: best_i,
            b_start: best_j,
            len: best_len,
        }
    }

    /// All matching blocks, ordered by position.
    fn blocks(&self) -> Vec<Block> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.longest_match(alo, ahi, blo, bhi);
            if block.len == 0 {
                continue;
            }
            if alo < block.a_start && blo < block.b_start {
                pending.push((alo, block.a_start, blo, block.b_start));
            }
            let a_end = block.a_start + block.len;
            let b_end = block.b_start + block.len;
            if a_end < ahi && b_end < bhi {
                pending.push((a_end, ahi, b_end, bhi));
            }
            found.push(block);
        }

        found.sort_by_key(|b| (b.a_start, b.b_start));
        found
    }

    fn matched_len(&self) -> usize {
        self.blocks().iter().map(|b| b.len).sum()
    }
}


/// Matched length reported by the `difflib` crate's `SequenceMatcher`.
#[cfg(test)]
fn difflib_matched_len(a: &[char], b: &[char]) -> usize {
    difflib::sequencematcher::SequenceMatcher::new(a, b)
        .get_matching_blocks()
        .iter()
        .map(|m| m.size)
        .sum()
}
