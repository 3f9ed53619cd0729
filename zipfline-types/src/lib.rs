//! Core types for the zipfline frequency analyzer.
//!
//! This crate provides the fundamental value types that are shared across
//! the zipfline pipeline. Keeping types separate ensures:
//!
//! - **Compact keys**: n-gram keys are sized for hash-map efficiency
//! - **Cross-crate compatibility**: core and CLI share the same types
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Order of an n-gram window.
///
/// The pipeline computes statistics for three window sizes over the token
/// stream: single words, adjacent pairs and adjacent triplets.
///
/// `#[repr(u8)]` guarantees a stable 1-byte layout, and the discriminant
/// doubles as the window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NGramOrder {
    /// Single words.
    Unigram = 1,
    /// Adjacent word pairs.
    Bigram = 2,
    /// Adjacent word triplets.
    Trigram = 3,
}

impl NGramOrder {
    /// All orders the pipeline computes, lowest first.
    pub const ALL: [NGramOrder; 3] = [NGramOrder::Unigram, NGramOrder::Bigram, NGramOrder::Trigram];

    /// Window width in tokens.
    #[must_use]
    #[inline(always)]
    pub const fn window(self) -> usize {
        self as usize
    }

    /// Tokens a chunk must borrow from its successor so that windows
    /// starting inside the chunk can complete.
    #[must_use]
    #[inline(always)]
    pub const fn overlap(self) -> usize {
        self.window() - 1
    }

    /// Human-readable name used in snapshots and log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            NGramOrder::Unigram => "words",
            NGramOrder::Bigram => "pairs",
            NGramOrder::Trigram => "triplets",
        }
    }

    /// Number of full windows a token sequence of length `n` yields.
    #[must_use]
    #[inline(always)]
    pub const fn windows_in(self, n: usize) -> usize {
        let k = self.window();
        if n < k {
            0
        } else {
            n - k + 1
        }
    }
}

impl fmt::Display for NGramOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered tuple of consecutive tokens, used as a frequency-table key.
///
/// Tuple order reflects original document order. An `NGram` is a pure value
/// type: two n-grams are equal iff their token sequences are equal, and the
/// derived `Ord` (lexicographic over tokens) is the deterministic secondary
/// sort key used throughout ranking.
///
/// Unigrams are represented as 1-tuples so that all three orders share one
/// key type and one JSON shape: an n-gram serializes as an array of its
/// tokens (`["the","cat"]`).
///
/// The tokens are stored inline (`SmallVec<[Box<str>; 3]>`), so the tuple
/// itself never spills to the heap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NGram(SmallVec<[Box<str>; 3]>);

impl NGram {
    /// Creates an n-gram from a window of tokens.
    ///
    /// Windows of 1 to 3 tokens are the ones the pipeline produces; other
    /// widths are representable but trip a debug assertion.
    pub fn from_window<T: AsRef<str>>(tokens: &[T]) -> Self {
        debug_assert!(
            (1..=3).contains(&tokens.len()),
            "n-gram window must hold 1 to 3 tokens, got {}",
            tokens.len()
        );
        Self(tokens.iter().map(|t| Box::<str>::from(t.as_ref())).collect())
    }

    /// Creates a 1-tuple.
    pub fn unigram(token: &str) -> Self {
        Self::from_window(&[token])
    }

    /// Creates a pair.
    pub fn bigram(first: &str, second: &str) -> Self {
        Self::from_window(&[first, second])
    }

    /// Creates a triplet.
    pub fn trigram(first: &str, second: &str, third: &str) -> Self {
        Self::from_window(&[first, second, third])
    }

    /// Window width of this n-gram.
    #[must_use]
    #[inline(always)]
    pub fn window(&self) -> usize {
        self.0.len()
    }

    /// Order of this n-gram, if it is one the pipeline produces.
    #[must_use]
    pub fn order(&self) -> Option<NGramOrder> {
        match self.0.len() {
            1 => Some(NGramOrder::Unigram),
            2 => Some(NGramOrder::Bigram),
            3 => Some(NGramOrder::Trigram),
            _ => None,
        }
    }

    /// Iterates the tokens in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.as_ref())
    }
}

impl fmt::Display for NGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// An n-gram paired with its occurrence count and frequency rank.
///
/// Rank 1.0 is the most frequent item. Equal counts share a rank value:
/// the average of their tied 1-based positions, so counts `[5,5,3]` rank
/// as `[1.5, 1.5, 3.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// The ranked n-gram.
    #[serde(rename = "item")]
    pub ngram: NGram,
    /// Number of occurrences observed.
    pub count: u64,
    /// Frequency rank (1.0 = most frequent; ties averaged).
    pub rank: f64,
}

impl RankedEntry {
    /// Creates a ranked entry.
    #[must_use]
    pub fn new(ngram: NGram, count: u64, rank: f64) -> Self {
        Self { ngram, count, rank }
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} count={} rank={:.1}", self.ngram, self.count, self.rank)
    }
}

/// Identification of the analyzed book.
///
/// Title is mandatory (it names the snapshot); author and series are
/// optional and flow into the snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMeta {
    /// Book title.
    pub title: String,
    /// Author, if known.
    #[serde(default)]
    pub author: Option<String>,
    /// Series the book belongs to, if any.
    #[serde(default)]
    pub series: Option<String>,
}

impl BookMeta {
    /// Creates metadata with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            series: None,
        }
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the series.
    #[must_use]
    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }
}

impl fmt::Display for BookMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if let Some(author) = &self.author {
            write!(f, " by {}", author)?;
        }
        if let Some(series) = &self.series {
            write!(f, " ({})", series)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_windows() {
        assert_eq!(NGramOrder::Unigram.window(), 1);
        assert_eq!(NGramOrder::Bigram.window(), 2);
        assert_eq!(NGramOrder::Trigram.window(), 3);
    }

    #[test]
    fn order_overlap_is_window_minus_one() {
        for order in NGramOrder::ALL {
            assert_eq!(order.overlap(), order.window() - 1);
        }
    }

    #[test]
    fn order_size_is_1_byte() {
        assert_eq!(size_of::<NGramOrder>(), 1);
    }

    #[test]
    fn windows_in_matches_count_law() {
        // max(0, n - k + 1) for every (n, k) pair
        for n in 0..20usize {
            for order in NGramOrder::ALL {
                let k = order.window();
                let expected = if n >= k { n - k + 1 } else { 0 };
                assert_eq!(order.windows_in(n), expected, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn ngram_equality_is_by_value() {
        assert_eq!(NGram::bigram("the", "cat"), NGram::from_window(&["the", "cat"]));
        assert_ne!(NGram::bigram("the", "cat"), NGram::bigram("cat", "the"));
    }

    #[test]
    fn ngram_order_detection() {
        assert_eq!(NGram::unigram("a").order(), Some(NGramOrder::Unigram));
        assert_eq!(NGram::bigram("a", "b").order(), Some(NGramOrder::Bigram));
        assert_eq!(NGram::trigram("a", "b", "c").order(), Some(NGramOrder::Trigram));
    }

    #[test]
    fn ngram_ord_is_lexicographic() {
        let mut grams = vec![
            NGram::bigram("the", "mat"),
            NGram::bigram("cat", "sat"),
            NGram::bigram("the", "cat"),
        ];
        grams.sort();
        assert_eq!(grams[0], NGram::bigram("cat", "sat"));
        assert_eq!(grams[1], NGram::bigram("the", "cat"));
        assert_eq!(grams[2], NGram::bigram("the", "mat"));
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        let uni = NGram::unigram("the");
        let bi = NGram::bigram("the", "cat");
        assert!(uni < bi);
    }

    #[test]
    fn ngram_display_joins_with_spaces() {
        assert_eq!(NGram::trigram("the", "cat", "sat").to_string(), "the cat sat");
        assert_eq!(NGram::unigram("the").to_string(), "the");
    }

    #[test]
    fn ngram_serializes_as_token_array() {
        let json = serde_json::to_value(NGram::bigram("the", "cat")).unwrap();
        assert_eq!(json, serde_json::json!(["the", "cat"]));

        let back: NGram = serde_json::from_value(json).unwrap();
        assert_eq!(back, NGram::bigram("the", "cat"));
    }

    #[test]
    fn unigram_serializes_as_1_tuple() {
        let json = serde_json::to_value(NGram::unigram("the")).unwrap();
        assert_eq!(json, serde_json::json!(["the"]));
    }

    #[test]
    fn ranked_entry_json_field_names() {
        let entry = RankedEntry::new(NGram::unigram("the"), 3, 1.0);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"item": ["the"], "count": 3, "rank": 1.0})
        );
    }

    #[test]
    fn book_meta_builders() {
        let meta = BookMeta::new("hitchhiker")
            .with_author("Douglas Adams")
            .with_series("H2G2");
        assert_eq!(meta.title, "hitchhiker");
        assert_eq!(meta.author.as_deref(), Some("Douglas Adams"));
        assert_eq!(meta.series.as_deref(), Some("H2G2"));
    }

    #[test]
    fn book_meta_optional_fields_default_to_none() {
        let meta: BookMeta = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(meta, BookMeta::new("t"));
    }

    #[test]
    fn book_meta_display() {
        assert_eq!(BookMeta::new("t").to_string(), "t");
        assert_eq!(
            BookMeta::new("t").with_author("a").with_series("s").to_string(),
            "t by a (s)"
        );
    }
}
