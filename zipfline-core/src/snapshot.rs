//! JSON snapshot output.
//!
//! Serializes an [`AnalysisResult`] to a JSON document at
//! `out_root/<title>/<title>.json`. Count lists are written in the
//! canonical deterministic order (count descending, n-gram ascending), so
//! two runs over the same input produce identical bytes.
//!
//! Output-directory creation is idempotent: "already exists" is not an
//! error, any other creation failure propagates.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use zipfline_types::{NGram, RankedEntry};

use crate::error::{AnalysisError, Result};
use crate::freq::FrequencyTable;
use crate::pipeline::AnalysisResult;

/// One `{item, count}` line of a count list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    /// The counted n-gram, as an array of its tokens.
    pub item: NGram,
    /// Number of occurrences.
    pub count: u64,
}

/// The persisted shape of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Book title.
    pub title: String,
    /// Author, if known.
    pub author: Option<String>,
    /// Series, if any.
    pub series: Option<String>,
    /// All word counts, most frequent first.
    pub words_count: Vec<CountEntry>,
    /// All pair counts, most frequent first.
    pub pairs_count: Vec<CountEntry>,
    /// All triplet counts, most frequent first.
    pub triplets_count: Vec<CountEntry>,
    /// Top words with ranks.
    pub words_most_common: Vec<RankedEntry>,
    /// Top pairs with ranks.
    pub pairs_most_common: Vec<RankedEntry>,
    /// Top triplets with ranks.
    pub triplets_most_common: Vec<RankedEntry>,
}

impl Snapshot {
    /// Builds the persisted shape from an analysis result.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            title: result.meta.title.clone(),
            author: result.meta.author.clone(),
            series: result.meta.series.clone(),
            words_count: count_entries(&result.words),
            pairs_count: count_entries(&result.pairs),
            triplets_count: count_entries(&result.triplets),
            words_most_common: result.top_words.clone(),
            pairs_most_common: result.top_pairs.clone(),
            triplets_most_common: result.top_triplets.clone(),
        }
    }
}

fn count_entries(table: &FrequencyTable) -> Vec<CountEntry> {
    table
        .sorted_entries()
        .into_iter()
        .map(|(item, count)| CountEntry { item, count })
        .collect()
}

/// Writes the snapshot for `result` under `out_root`, returning the path
/// of the written file.
pub fn write(result: &AnalysisResult, out_root: impl AsRef<Path>) -> Result<PathBuf> {
    let stem = file_stem(&result.meta.title);
    let dir = out_root.as_ref().join(&stem);

    // create_dir_all succeeds if the directory is already there
    fs::create_dir_all(&dir).map_err(|e| AnalysisError::snapshot_io(&dir, e))?;

    let path = dir.join(format!("{}.json", stem));
    let file = File::create(&path).map_err(|e| AnalysisError::snapshot_io(&path, e))?;
    serde_json::to_writer(BufWriter::new(file), &Snapshot::from_result(result))?;

    info!("wrote snapshot for '{}' to {}", result.meta.title, path.display());
    Ok(path)
}

/// Turns a title into a safe file stem: path separators and other
/// non-filename characters become hyphens.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = stem.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{AnalysisConfig, BookAnalyzer};
    use zipfline_types::BookMeta;

    fn sample_result() -> AnalysisResult {
        let analyzer = BookAnalyzer::with_config(AnalysisConfig {
            workers: Some(2),
            ..AnalysisConfig::default()
        });
        let units = vec!["the cat sat on the mat the cat ran".to_string()];
        analyzer.analyze(
            BookMeta::new("scenario").with_author("nobody"),
            &units,
        )
    }

    #[test]
    fn snapshot_json_shape() {
        let snapshot = Snapshot::from_result(&sample_result());
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["title"], "scenario");
        assert_eq!(json["author"], "nobody");
        assert_eq!(json["series"], serde_json::Value::Null);

        // deterministic order: ("the",3) first, ties lexicographic after
        assert_eq!(json["words_count"][0], serde_json::json!({"item": ["the"], "count": 3}));
        assert_eq!(json["words_count"][1], serde_json::json!({"item": ["cat"], "count": 2}));

        assert_eq!(
            json["pairs_count"][0],
            serde_json::json!({"item": ["the", "cat"], "count": 2})
        );

        assert_eq!(
            json["words_most_common"][0],
            serde_json::json!({"item": ["the"], "count": 3, "rank": 1.0})
        );
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let snapshot = Snapshot::from_result(&sample_result());
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn count_lists_cover_all_distinct_items() {
        let result = sample_result();
        let snapshot = Snapshot::from_result(&result);
        assert_eq!(snapshot.words_count.len(), result.words.distinct());
        assert_eq!(snapshot.pairs_count.len(), result.pairs.distinct());
        assert_eq!(snapshot.triplets_count.len(), result.triplets.distinct());
    }

    #[test]
    fn file_stem_sanitizes() {
        assert_eq!(file_stem("plain title"), "plain title");
        assert_eq!(file_stem("a/b\\c"), "a-b-c");
        assert_eq!(file_stem("dots.are.fine"), "dots.are.fine");
        assert_eq!(file_stem("  "), "untitled");
        assert_eq!(file_stem(""), "untitled");
    }

    #[test]
    fn write_creates_directory_and_is_idempotent() {
        let out_root = std::env::temp_dir().join(format!("zipfline-snap-{}", std::process::id()));
        let result = sample_result();

        let path = write(&result, &out_root).unwrap();
        assert!(path.ends_with(Path::new("scenario").join("scenario.json")));
        assert!(path.is_file());

        // second write into the existing directory must succeed
        let again = write(&result, &out_root).unwrap();
        assert_eq!(again, path);

        let bytes = fs::read(&path).unwrap();
        let parsed: Snapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.title, "scenario");

        fs::remove_dir_all(&out_root).unwrap();
    }
}
