//! Frequency ranking and top-N selection.
//!
//! Entries are ordered by the canonical policy (count descending, n-gram
//! lexicographic ascending) and assigned statistical ranks: rank 1.0 is the
//! most frequent item, and equal counts share the average of their tied
//! 1-based positions. Counts `[5, 5, 3]` therefore rank `[1.5, 1.5, 3.0]`.
//!
//! Top-N selection takes the first `n` entries of the same deterministic
//! order, so ties at the cutoff resolve the same way on every run.

use zipfline_types::RankedEntry;

use crate::freq::FrequencyTable;

/// Default size of the "most common" subsequence.
pub const DEFAULT_TOP_LIMIT: usize = 50;

/// Ranks every entry of a table.
///
/// The returned vector is in rank order (most frequent first).
pub fn rank_entries(table: &FrequencyTable) -> Vec<RankedEntry> {
    let entries = table.sorted_entries();
    let mut ranked = Vec::with_capacity(entries.len());

    let mut i = 0usize;
    while i < entries.len() {
        let mut j = i;
        while j + 1 < entries.len() && entries[j + 1].1 == entries[i].1 {
            j += 1;
        }

        // average of 1-based positions i+1 ..= j+1
        let rank = (i + j + 2) as f64 / 2.0;
        for (ngram, count) in &entries[i..=j] {
            ranked.push(RankedEntry::new(ngram.clone(), *count, rank));
        }

        i = j + 1;
    }

    ranked
}

/// The `limit` most frequent entries, ranked.
///
/// If fewer than `limit` distinct n-grams exist, all of them are returned:
/// `len == min(limit, distinct)`.
pub fn top_n(table: &FrequencyTable, limit: usize) -> Vec<RankedEntry> {
    let mut ranked = rank_entries(table);
    ranked.truncate(limit);
    ranked
}
