//! Error types for the query catalog.

use review_exam_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while loading or executing the query catalog.
#[derive(Error, Debug)]
pub enum QueryCatalogError {
    /// The catalog file could not be read.
    #[error("Read error: {0}")]
    ReadError(String),

    /// The catalog file is not valid JSON or has the wrong shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The search service did not answer the liveness probe.
    #[error("Search service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The target index does not exist.
    #[error("Index '{0}' not found, run the ETL first")]
    IndexNotFound(String),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

impl QueryCatalogError {
    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadError(msg.into())
    }
}

impl From<serde_json::Error> for QueryCatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
