//! N-gram extraction.
//!
//! Produces the ordered sequence of contiguous 1-, 2- or 3-token windows
//! over a token slice. For a sequence of length `n` and order `k`, exactly
//! `max(0, n - k + 1)` n-grams are emitted; unigrams are emitted as
//! 1-tuples.
//!
//! Extraction never crosses slice boundaries on its own: concatenating the
//! token streams of several content units before calling in here is an
//! explicit caller decision (see `AnalysisConfig::bridge_unit_boundaries`).

use zipfline_types::{NGram, NGramOrder};

/// Extracts n-grams of the given order using a sliding window.
///
/// For a slice shorter than the window, nothing is emitted.
///
/// # Example
///
/// ```
/// use zipfline_core::analyzer::ngram::extract_ngrams;
/// use zipfline_types::NGramOrder;
///
/// let tokens = ["the", "cat", "sat"];
/// let mut grams = Vec::new();
/// extract_ngrams(&tokens, NGramOrder::Bigram, |g| grams.push(g));
///
/// assert_eq!(grams.len(), 2); // ("the","cat"), ("cat","sat")
/// ```
#[inline]
pub fn extract_ngrams<T, F>(tokens: &[T], order: NGramOrder, mut emit: F)
where
    T: AsRef<str>,
    F: FnMut(NGram),
{
    let k = order.window();
    if tokens.len() < k {
        return;
    }

    for window in tokens.windows(k) {
        emit(NGram::from_window(window));
    }
}

/// Extracts n-grams into a vector.
pub fn collect_ngrams<T: AsRef<str>>(tokens: &[T], order: NGramOrder) -> Vec<NGram> {
    let mut grams = Vec::with_capacity(order.windows_in(tokens.len()));
    extract_ngrams(tokens, order, |g| grams.push(g));
    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    #[test]
    fn count_law_holds_for_all_orders() {
        for n in 0..12usize {
            let tokens = words(n);
            for order in NGramOrder::ALL {
                let k = order.window();
                let expected = if n >= k { n - k + 1 } else { 0 };
                let grams = collect_ngrams(&tokens, order);
                assert_eq!(grams.len(), expected, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn unigrams_are_the_tokens_as_1_tuples() {
        let tokens = ["the", "cat", "sat"];
        let grams = collect_ngrams(&tokens, NGramOrder::Unigram);
        assert_eq!(
            grams,
            vec![NGram::unigram("the"), NGram::unigram("cat"), NGram::unigram("sat")]
        );
    }

    #[test]
    fn bigrams_are_adjacent_pairs_in_order() {
        let tokens = ["the", "cat", "sat", "on"];
        let grams = collect_ngrams(&tokens, NGramOrder::Bigram);
        assert_eq!(
            grams,
            vec![
                NGram::bigram("the", "cat"),
                NGram::bigram("cat", "sat"),
                NGram::bigram("sat", "on"),
            ]
        );
    }

    #[test]
    fn trigrams_are_adjacent_triplets_in_order() {
        let tokens = ["the", "cat", "sat", "on"];
        let grams = collect_ngrams(&tokens, NGramOrder::Trigram);
        assert_eq!(
            grams,
            vec![
                NGram::trigram("the", "cat", "sat"),
                NGram::trigram("cat", "sat", "on"),
            ]
        );
    }

    #[test]
    fn short_sequences_emit_nothing() {
        let one = ["only"];
        assert!(collect_ngrams(&one, NGramOrder::Bigram).is_empty());
        assert!(collect_ngrams(&one, NGramOrder::Trigram).is_empty());

        let none: [&str; 0] = [];
        for order in NGramOrder::ALL {
            assert!(collect_ngrams(&none, order).is_empty());
        }
    }

    #[test]
    fn exact_window_emits_one() {
        let tokens = ["a", "b", "c"];
        assert_eq!(collect_ngrams(&tokens, NGramOrder::Trigram).len(), 1);
    }

    #[test]
    fn overlapping_windows_share_tokens() {
        let tokens = ["a", "b", "c"];
        let grams = collect_ngrams(&tokens, NGramOrder::Bigram);
        assert_eq!(grams[0], NGram::bigram("a", "b"));
        assert_eq!(grams[1], NGram::bigram("b", "c"));
    }
}
