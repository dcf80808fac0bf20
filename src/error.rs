//! Error types for splitting a PDF by its bookmarks.

use std::path::PathBuf;

/// Errors that can occur while splitting a document.
///
/// Everything except [`SplitError::Write`] aborts the run. Write errors are
/// per output file; the driver logs them and moves on to the next unit.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// Input path does not exist or cannot be read
    #[error("Could not find input file '{}'", .0.display())]
    InputNotFound(PathBuf),

    /// The document has no outline entries to split along
    #[error("No bookmarks found in '{}'", .0.display())]
    NoBookmarks(PathBuf),

    /// A maximum depth below 1 was requested
    #[error("Invalid depth {0}: depth must be at least 1")]
    InvalidDepth(i64),

    /// The input exists but is not a PDF lopdf can parse
    #[error("Failed to open PDF: {}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to create directory: {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extracting, serializing or writing one output file failed
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SplitError {
    pub fn write<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SplitError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
