//! Word and n-gram frequency analysis for electronic books.
//!
//! zipfline parses a book's content, tokenizes its text and computes
//! frequency statistics for single words, adjacent pairs and adjacent
//! triplets, the raw material for inspecting Zipf's-law rank/frequency
//! relationships (item frequency falling roughly inversely to its rank).
//!
//! Pipeline stages, leaf first:
//!
//! 1. [`analyzer::normalizer`]: strips markup, collapses whitespace
//! 2. [`analyzer::tokenizer`]: lower-cased word tokens, optionally
//!    filtered through an external linguistic annotator
//! 3. [`analyzer::ngram`]: contiguous 1/2/3-token windows
//! 4. [`freq`]: occurrence counting, with a parallel fan-out for the
//!    higher orders ([`freq::parallel`]) and statistical ranking with
//!    top-N selection ([`freq::rank`])
//! 5. [`pipeline`]: one-shot orchestration producing an [`AnalysisResult`]
//!
//! Around the pipeline sit the I/O collaborators: [`source`] reads content
//! units from disk, [`snapshot`] writes the per-run JSON document.
//!
//! ```
//! use zipfline_core::{BookAnalyzer, BookMeta};
//!
//! let analyzer = BookAnalyzer::new();
//! let units = vec!["<p>the cat sat on the mat</p>".to_string()];
//! let result = analyzer.analyze(BookMeta::new("demo"), &units);
//!
//! assert_eq!(result.words.total(), 6);
//! assert_eq!(result.top_words[0].ngram.to_string(), "the");
//! ```

pub mod analyzer;
pub mod error;
pub mod freq;
pub mod pipeline;
pub mod snapshot;
pub mod source;

pub use error::{AnalysisError, Result};
pub use freq::FrequencyTable;
pub use pipeline::{AnalysisConfig, AnalysisResult, BookAnalyzer};
pub use source::{BookDirSource, ContentSource, TextFileSource};
pub use zipfline_types::{BookMeta, NGram, NGramOrder, RankedEntry};
