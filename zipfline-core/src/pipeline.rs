//! Pipeline orchestration.
//!
//! Wires the stages together for one analysis run:
//!
//! ```text
//! content units -> normalize -> tokenize -> n-grams (1,2,3) -> count -> rank
//! ```
//!
//! Units whose normalized text is empty contribute nothing. Word counts are
//! accumulated in a single sequential pass; pair and triplet counts go
//! through the parallel fan-out. An empty book is not an error; the result
//! simply holds empty tables.

use log::{debug, info};
use zipfline_types::{BookMeta, NGramOrder, RankedEntry};

use crate::analyzer::annotate::{Annotator, CategoryFilter};
use crate::analyzer::normalizer::MarkupNormalizer;
use crate::analyzer::tokenizer::WordTokenizer;
use crate::freq::parallel::{available_workers, count_parallel, count_sequential};
use crate::freq::rank::{top_n, DEFAULT_TOP_LIMIT};
use crate::freq::FrequencyTable;

/// Tuning knobs for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Fan-out width for pair/triplet counting. `None` uses the number of
    /// available processing units.
    pub workers: Option<usize>,
    /// Size of the "most common" lists.
    pub top_limit: usize,
    /// When `true`, token streams of all content units are concatenated
    /// before n-gram extraction, letting windows form across the junction
    /// of adjacent units. When `false` (default), extraction is per unit
    /// and no window crosses one.
    pub bridge_unit_boundaries: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workers: None,
            top_limit: DEFAULT_TOP_LIMIT,
            bridge_unit_boundaries: false,
        }
    }
}

/// Everything one run produces.
///
/// Immutable once built; hand it to the snapshot writer or a plotting
/// collaborator.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Identification of the analyzed book.
    pub meta: BookMeta,
    /// Word (unigram) frequency table.
    pub words: FrequencyTable,
    /// Adjacent-pair frequency table.
    pub pairs: FrequencyTable,
    /// Adjacent-triplet frequency table.
    pub triplets: FrequencyTable,
    /// Most common words, ranked.
    pub top_words: Vec<RankedEntry>,
    /// Most common pairs, ranked.
    pub top_pairs: Vec<RankedEntry>,
    /// Most common triplets, ranked.
    pub top_triplets: Vec<RankedEntry>,
}

impl AnalysisResult {
    /// Frequency table for the given order.
    pub fn table(&self, order: NGramOrder) -> &FrequencyTable {
        match order {
            NGramOrder::Unigram => &self.words,
            NGramOrder::Bigram => &self.pairs,
            NGramOrder::Trigram => &self.triplets,
        }
    }

    /// Ranked most-common list for the given order.
    pub fn most_common(&self, order: NGramOrder) -> &[RankedEntry] {
        match order {
            NGramOrder::Unigram => &self.top_words,
            NGramOrder::Bigram => &self.top_pairs,
            NGramOrder::Trigram => &self.top_triplets,
        }
    }
}

/// One-shot analyzer: normalizes, tokenizes and counts a book.
///
/// # Examples
///
/// ```
/// use zipfline_core::pipeline::BookAnalyzer;
/// use zipfline_types::BookMeta;
///
/// let analyzer = BookAnalyzer::new();
/// let units = vec!["<p>the cat sat</p>".to_string()];
/// let result = analyzer.analyze(BookMeta::new("demo"), &units);
/// assert_eq!(result.words.total(), 3);
/// ```
#[derive(Default)]
pub struct BookAnalyzer {
    normalizer: MarkupNormalizer,
    tokenizer: WordTokenizer,
    config: AnalysisConfig,
}

impl BookAnalyzer {
    /// Creates an analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with the given configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes a book given its raw content units, using the scan-path
    /// tokenizer (the path in effect when no annotator is supplied).
    pub fn analyze(&self, meta: BookMeta, units: &[String]) -> AnalysisResult {
        let unit_tokens = self.tokenize_units(units, |text| self.tokenizer.tokenize(text));
        self.count_and_rank(meta, unit_tokens)
    }

    /// Analyzes a book using an external annotator; tokens whose category
    /// the filter excludes are dropped before counting.
    pub fn analyze_annotated(
        &self,
        meta: BookMeta,
        units: &[String],
        annotator: &dyn Annotator,
        filter: CategoryFilter,
    ) -> AnalysisResult {
        let unit_tokens = self.tokenize_units(units, |text| {
            self.tokenizer.tokenize_annotated(text, annotator, filter)
        });
        self.count_and_rank(meta, unit_tokens)
    }

    /// Normalizes and tokenizes each unit, skipping units that normalize
    /// to nothing.
    fn tokenize_units<F>(&self, units: &[String], tokenize: F) -> Vec<Vec<String>>
    where
        F: Fn(&str) -> Vec<String>,
    {
        let mut norm_buf = String::new();
        let mut unit_tokens = Vec::with_capacity(units.len());

        for unit in units {
            self.normalizer.normalize_into(unit, &mut norm_buf);
            if norm_buf.is_empty() {
                debug!("skipping unit with no extractable text");
                continue;
            }
            unit_tokens.push(tokenize(&norm_buf));
        }

        unit_tokens
    }

    fn count_and_rank(&self, meta: BookMeta, unit_tokens: Vec<Vec<String>>) -> AnalysisResult {
        let workers = self.config.workers.unwrap_or_else(available_workers).max(1);

        let (words, pairs, triplets) = if self.config.bridge_unit_boundaries {
            // one concatenated stream: windows may form across unit junctions
            let all: Vec<String> = unit_tokens.into_iter().flatten().collect();
            (
                count_sequential(&all, NGramOrder::Unigram),
                count_parallel(&all, NGramOrder::Bigram, workers),
                count_parallel(&all, NGramOrder::Trigram, workers),
            )
        } else {
            let mut words = FrequencyTable::new();
            let mut pairs = FrequencyTable::new();
            let mut triplets = FrequencyTable::new();
            for tokens in &unit_tokens {
                words.merge(count_sequential(tokens, NGramOrder::Unigram));
                pairs.merge(count_parallel(tokens, NGramOrder::Bigram, workers));
                triplets.merge(count_parallel(tokens, NGramOrder::Trigram, workers));
            }
            (words, pairs, triplets)
        };

        info!(
            "{}: {} tokens, {} distinct words, {} distinct pairs, {} distinct triplets",
            meta.title,
            words.total(),
            words.distinct(),
            pairs.distinct(),
            triplets.distinct()
        );

        let limit = self.config.top_limit;
        AnalysisResult {
            top_words: top_n(&words, limit),
            top_pairs: top_n(&pairs, limit),
            top_triplets: top_n(&triplets, limit),
            meta,
            words,
            pairs,
            triplets,
        }
    }
}
