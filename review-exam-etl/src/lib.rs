//! # Review Exam ETL
//!
//! This crate loads the clothing review CSV into the search index.
//!
//! ## Architecture
//!
//! The ETL follows the Extract-Transform-Load pattern:
//!
//! 1. **Extract**: Reads raw rows from the CSV file
//! 2. **Transform**: Normalizes rows into review documents
//! 3. **Loader**: Recreates the index and bulk-loads documents in batches
//! 4. **Orchestrator**: Waits for the search service and runs the steps in order

pub mod errors;
pub mod extract;
pub mod loader;
pub mod orchestrator;
pub mod transform;

#[cfg(test)]
mod testing;

pub use errors::EtlError;
pub use loader::{IndexManager, LoadSummary, LoaderConfig};
pub use orchestrator::{EtlReport, EtlService, IndexMode};
pub use transform::{transform, TransformOutput, TransformSummary};
