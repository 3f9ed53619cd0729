//! Error types for the analysis pipeline.

use std::error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::result;

/// Type alias for results produced by this crate.
pub type Result<T> = result::Result<T, AnalysisError>;

/// Errors that can end an analysis run.
///
/// Normalization and counting never fail; what can go wrong is the world
/// around the pipeline: reading a source, creating the output directory,
/// writing the snapshot.
#[derive(Debug)]
pub enum AnalysisError {
    /// An input source could not be read. Fatal for the run; not retried.
    Source {
        /// Path of the file or directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The snapshot file or its directory could not be created or written.
    /// "Directory already exists" never surfaces here (creation is
    /// idempotent), but any other failure does.
    Snapshot {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The snapshot could not be serialized to JSON.
    Serialize(serde_json::Error),
}

impl AnalysisError {
    /// Wraps an I/O error from reading `path`.
    pub fn source_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        AnalysisError::Source {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wraps an I/O error from writing the snapshot at `path`.
    pub fn snapshot_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        AnalysisError::Snapshot {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Source { path, source } => {
                write!(f, "cannot read source {}: {}", path.display(), source)
            }
            AnalysisError::Snapshot { path, source } => {
                write!(f, "cannot write snapshot {}: {}", path.display(), source)
            }
            AnalysisError::Serialize(err) => write!(f, "cannot serialize snapshot: {}", err),
        }
    }
}

impl error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            AnalysisError::Source { source, .. } => Some(source),
            AnalysisError::Snapshot { source, .. } => Some(source),
            AnalysisError::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialize(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_includes_path() {
        let err = AnalysisError::source_io(
            "books/missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("books"), "got {:?}", msg);
        assert!(msg.contains("no such file"), "got {:?}", msg);
    }

    #[test]
    fn chains_the_underlying_error() {
        let err = AnalysisError::snapshot_io(
            "out/x.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
    }
}
