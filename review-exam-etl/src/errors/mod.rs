//! Error types for the review ETL.

use review_exam_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while extracting or loading reviews.
///
/// The transform step has no error type: bad values degrade to defaults.
#[derive(Error, Debug)]
pub enum EtlError {
    /// The input file could not be read or parsed as CSV.
    #[error("Extract error: {0}")]
    ExtractError(String),

    /// The input file lacks required columns.
    #[error("Missing columns in input: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Error from the index lifecycle or bulk load.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

impl EtlError {
    /// Create an extract error.
    pub fn extract(msg: impl Into<String>) -> Self {
        Self::ExtractError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}

impl From<csv::Error> for EtlError {
    fn from(err: csv::Error) -> Self {
        Self::ExtractError(err.to_string())
    }
}
