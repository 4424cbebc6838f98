//! Error types for the review exam repository.

mod search_error;

pub use search_error::SearchError;
