//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Strips markup and collapses whitespace in raw content
//! - **Tokenizer**: Splits normalized text into lower-cased word tokens
//! - **Ngram**: Extracts word windows of order 1, 2 and 3
//! - **Annotate**: The optional linguistic-annotator seam and its category filter

pub mod annotate;
pub mod ngram;
pub mod normalizer;
pub mod tokenizer;

pub use annotate::{AnnotatedToken, Annotator, Category, CategoryFilter};
pub use normalizer::MarkupNormalizer;
pub use tokenizer::WordTokenizer;
