use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading and reshaping operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error type returned by the loader.
///
/// Queries never fail: a filter that matches nothing yields an empty
/// [`crate::query::ResultTable`], not an error.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The input file does not exist.
    ///
    /// This is terminal for the view that requested the file; callers should show a message and
    /// stop rendering that view.
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Underlying I/O error other than a missing file (permission denied, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON input could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (missing identifier column, no year columns,
    /// unknown format, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

impl ExplorerError {
    /// Returns `true` for [`ExplorerError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
