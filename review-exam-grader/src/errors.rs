//! Error types for the grader.

use thiserror::Error;

/// Errors that can occur while reading results or writing reports.
#[derive(Error, Debug)]
pub enum GraderError {
    /// The results file is not well-formed JUnit XML.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A report could not be written.
    #[error("Write error: {0}")]
    WriteError(String),

    /// The JSON report could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GraderError {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }
}

impl From<serde_json::Error> for GraderError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
