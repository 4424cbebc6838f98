//! # Review Exam Queries
//!
//! The student query catalog: a JSON file holding one aggregation query
//! per exam task.
//!
//! - [`catalog`] loads the file and names the expected tasks
//! - [`validation`] checks structure without a search service
//! - [`execution`] runs every non-empty query against the live index

pub mod catalog;
pub mod errors;
pub mod execution;
pub mod validation;

pub use catalog::{QueryCatalog, QueryEntry, QUERY_NAMES};
pub use errors::QueryCatalogError;
pub use execution::{execute_catalog, ExecutionReport, QueryOutcome, QueryRun};
pub use validation::{validate_catalog, QueryIssue, ValidationReport};
