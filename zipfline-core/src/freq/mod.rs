//! Frequency counting, parallel aggregation and ranking.
//!
//! [`FrequencyTable`] is the accumulation structure every stage feeds:
//! counting is commutative, so tables built in any order (sequentially,
//! per content unit, or per fan-out worker) merge into the same result.

pub mod parallel;
pub mod rank;

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use zipfline_types::NGram;

/// Mapping from n-gram to occurrence count.
///
/// Invariants:
/// - every distinct n-gram observed appears exactly once as a key,
/// - `total()` equals the sum of all counts, i.e. the number of items the
///   table has absorbed.
///
/// The result is independent of insertion order; [`sorted_entries`] imposes
/// the one deterministic order used everywhere downstream.
///
/// [`sorted_entries`]: FrequencyTable::sorted_entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    counts: FxHashMap<NGram, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence.
    #[inline]
    pub fn add(&mut self, ngram: NGram) {
        *self.counts.entry(ngram).or_insert(0) += 1;
        self.total += 1;
    }

    /// Records `n` occurrences at once.
    #[inline]
    pub fn add_count(&mut self, ngram: NGram, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(ngram).or_insert(0) += n;
        self.total += n;
    }

    /// Builds a table from a sequence of n-grams.
    pub fn from_ngrams<I: IntoIterator<Item = NGram>>(ngrams: I) -> Self {
        let mut table = Self::new();
        for ngram in ngrams {
            table.add(ngram);
        }
        table
    }

    /// Sums another table's counts into this one.
    pub fn merge(&mut self, other: FrequencyTable) {
        for (ngram, count) in other.counts {
            self.add_count(ngram, count);
        }
    }

    /// Occurrence count of an n-gram (0 if absent).
    #[inline]
    pub fn count(&self, ngram: &NGram) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Number of distinct n-grams.
    #[inline]
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of occurrences absorbed.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` if nothing has been counted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&NGram, u64)> {
        self.counts.iter().map(|(g, &c)| (g, c))
    }

    /// Entries in the canonical deterministic order: count descending,
    /// then n-gram lexicographic ascending.
    ///
    /// Ranks are assigned in this order, top-N cuts in this order, and
    /// snapshots are written in this order: one policy everywhere.
    pub fn sorted_entries(&self) -> Vec<(NGram, u64)> {
        let mut entries: Vec<(NGram, u64)> =
            self.counts.iter().map(|(g, &c)| (g.clone(), c)).collect();
        entries.sort_unstable_by(entry_order);
        entries
    }
}

/// Canonical entry order: count descending, n-gram ascending.
#[inline]
fn entry_order(a: &(NGram, u64), b: &(NGram, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

impl FromIterator<NGram> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = NGram>>(iter: I) -> Self {
        Self::from_ngrams(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uni(t: &str) -> NGram {
        NGram::unigram(t)
    }

    #[test]
    fn counts_occurrences() {
        let table = FrequencyTable::from_ngrams(
            ["the", "cat", "the", "mat", "the"].map(uni),
        );
        assert_eq!(table.count(&uni("the")), 3);
        assert_eq!(table.count(&uni("cat")), 1);
        assert_eq!(table.count(&uni("dog")), 0);
    }

    #[test]
    fn sum_of_counts_equals_input_length() {
        let items = ["a", "b", "a", "c", "a", "b"].map(uni);
        let len = items.len() as u64;
        let table = FrequencyTable::from_ngrams(items);
        assert_eq!(table.total(), len);
        assert_eq!(table.iter().map(|(_, c)| c).sum::<u64>(), len);
    }

    #[test]
    fn distinct_keys_are_unique() {
        let table = FrequencyTable::from_ngrams(["a", "b", "a"].map(uni));
        assert_eq!(table.distinct(), 2);
    }

    #[test]
    fn result_is_order_independent() {
        let forward = FrequencyTable::from_ngrams(["a", "b", "a", "c"].map(uni));
        let backward = FrequencyTable::from_ngrams(["c", "a", "b", "a"].map(uni));
        assert_eq!(forward, backward);
    }

    #[test]
    fn merge_sums_counts() {
        let mut left = FrequencyTable::from_ngrams(["a", "b"].map(uni));
        let right = FrequencyTable::from_ngrams(["b", "c"].map(uni));
        left.merge(right);

        assert_eq!(left.count(&uni("a")), 1);
        assert_eq!(left.count(&uni("b")), 2);
        assert_eq!(left.count(&uni("c")), 1);
        assert_eq!(left.total(), 4);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut table = FrequencyTable::from_ngrams(["a", "b"].map(uni));
        let before = table.clone();
        table.merge(FrequencyTable::new());
        assert_eq!(table, before);
    }

    #[test]
    fn add_count_zero_is_a_no_op() {
        let mut table = FrequencyTable::new();
        table.add_count(uni("a"), 0);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.total(), 0);
        assert!(table.sorted_entries().is_empty());
    }

    #[test]
    fn sorted_entries_by_count_desc() {
        let table = FrequencyTable::from_ngrams(["b", "a", "b", "c", "b", "a"].map(uni));
        let entries = table.sorted_entries();
        assert_eq!(entries[0], (uni("b"), 3));
        assert_eq!(entries[1], (uni("a"), 2));
        assert_eq!(entries[2], (uni("c"), 1));
    }

    #[test]
    fn sorted_entries_break_ties_lexicographically() {
        let table = FrequencyTable::from_ngrams(["zed", "ant", "mid"].map(uni));
        let entries = table.sorted_entries();
        assert_eq!(entries[0].0, uni("ant"));
        assert_eq!(entries[1].0, uni("mid"));
        assert_eq!(entries[2].0, uni("zed"));
    }

    #[test]
    fn works_with_higher_orders() {
        let table = FrequencyTable::from_ngrams([
            NGram::bigram("the", "cat"),
            NGram::bigram("the", "cat"),
            NGram::bigram("cat", "sat"),
        ]);
        assert_eq!(table.count(&NGram::bigram("the", "cat")), 2);
        assert_eq!(table.total(), 3);
    }
}
