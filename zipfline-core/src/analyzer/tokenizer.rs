//! Word tokenizer.
//!
//! The second stage of the pipeline: splits normalized text into an ordered
//! sequence of lower-cased word tokens.
//!
//! ## The Two Paths
//!
//! - **Scan path** (default, the one in effect unless an annotator is
//!   supplied): a single forward byte scan emitting maximal runs of ASCII
//!   alphanumerics, hyphens and apostrophes. Everything else (whitespace,
//!   punctuation, escaped entities, non-ASCII symbols) is a delimiter.
//! - **Annotated path**: delegates to an external [`Annotator`], which also
//!   yields a linguistic [`Category`] per token; a [`CategoryFilter`] then
//!   drops excluded categories. The filter applies *only* on this path.
//!
//! Token order is preserved exactly as encountered; tokens are lower-cased
//! before being returned.
//!
//! [`Annotator`]: crate::analyzer::annotate::Annotator
//! [`Category`]: crate::analyzer::annotate::Category
//! [`CategoryFilter`]: crate::analyzer::annotate::CategoryFilter

use crate::analyzer::annotate::{Annotator, CategoryFilter};

/// Bytes that form words: ASCII alphanumerics plus hyphen and apostrophe.
#[inline(always)]
const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'\''
}

/// Splits normalized text into lower-cased word tokens.
///
/// # Examples
///
/// ```
/// use zipfline_core::analyzer::tokenizer::WordTokenizer;
///
/// let tokenizer = WordTokenizer::new();
/// let tokens = tokenizer.tokenize("The cat sat, didn't it?");
/// assert_eq!(tokens, vec!["the", "cat", "sat", "didn't", "it"]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes text on the scan path, collecting the tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        self.tokenize_with(text, |t| tokens.push(t));
        tokens
    }

    /// Tokenizes text on the scan path and emits each token in order.
    ///
    /// Word bytes are ASCII, so every run boundary is a UTF-8 character
    /// boundary; multi-byte characters act as delimiters.
    pub fn tokenize_with<F>(&self, text: &str, mut emit: F)
    where
        F: FnMut(String),
    {
        let bytes = text.as_bytes();
        let mut start: Option<usize> = None;

        for (i, &b) in bytes.iter().enumerate() {
            if is_word_byte(b) {
                if start.is_none() {
                    start = Some(i);
                }
            } else if let Some(s) = start.take() {
                emit(text[s..i].to_ascii_lowercase());
            }
        }

        if let Some(s) = start {
            emit(text[s..].to_ascii_lowercase());
        }
    }

    /// Tokenizes text on the annotated path.
    ///
    /// The annotator supplies tokens with category labels; tokens whose
    /// category the filter excludes are dropped, the rest are lower-cased
    /// in document order.
    pub fn tokenize_annotated(
        &self,
        text: &str,
        annotator: &dyn Annotator,
        filter: CategoryFilter,
    ) -> Vec<String> {
        annotator
            .annotate(text)
            .into_iter()
            .filter(|token| !filter.excludes(token.category))
            .map(|token| token.text.to_lowercase())
            .collect()
    }
}
