//! Input sources.
//!
//! Sources are external collaborators of the pipeline: they produce the
//! ordered raw content units one book consists of. Two implementations are
//! provided: a plain-text file and an unpacked book directory. Reading a
//! packed container format in full fidelity is out of scope; unpack the
//! archive first and point [`BookDirSource`] at the content directory.
//!
//! A missing or unreadable source is fatal for the run and is not retried.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use zipfline_types::BookMeta;

use crate::error::{AnalysisError, Result};

/// Produces the ordered raw content units of one book.
pub trait ContentSource {
    /// Reads all content units, in document order.
    fn units(&self) -> Result<Vec<String>>;
}

/// A whole book in a single plain-text file.
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    /// Creates a source for an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a source for a book under a library root, composing
    /// `root/[series]/[author]/title.txt` with path joins.
    pub fn for_book(root: impl AsRef<Path>, meta: &BookMeta) -> Self {
        Self {
            path: compose_book_path(root.as_ref(), meta),
        }
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for TextFileSource {
    fn units(&self) -> Result<Vec<String>> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| AnalysisError::source_io(&self.path, e))?;
        info!("read {} bytes from {}", content.len(), self.path.display());
        Ok(vec![content])
    }
}

/// Composes `root/[series]/[author]/title.txt`.
fn compose_book_path(root: &Path, meta: &BookMeta) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(series) = &meta.series {
        path.push(series);
    }
    if let Some(author) = &meta.author {
        path.push(author);
    }
    path.push(format!("{}.txt", meta.title));
    path
}

/// An unpacked book directory.
///
/// Reads every `.xhtml`, `.html`, `.htm` and `.txt` entry directly inside
/// the directory, in lexicographic name order, as the ordered sequence of
/// content units. Other entries and subdirectories are ignored.
pub struct BookDirSource {
    dir: PathBuf,
}

const CONTENT_EXTENSIONS: [&str; 4] = ["xhtml", "html", "htm", "txt"];

impl BookDirSource {
    /// Creates a source for an unpacked content directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this source reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn content_paths(&self) -> Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| AnalysisError::source_io(&self.dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AnalysisError::source_io(&self.dir, e))?;
            let path = entry.path();
            if path.is_file() && has_content_extension(&path) {
                paths.push(path);
            }
        }

        // reading order must be reproducible across platforms
        paths.sort();
        Ok(paths)
    }
}

fn has_content_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CONTENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl ContentSource for BookDirSource {
    fn units(&self) -> Result<Vec<String>> {
        let paths = self.content_paths()?;
        let mut units = Vec::with_capacity(paths.len());

        for path in &paths {
            let content =
                fs::read_to_string(path).map_err(|e| AnalysisError::source_io(path, e))?;
            units.push(content);
        }

        info!("read {} content units from {}", units.len(), self.dir.display());
        Ok(units)
    }
}
