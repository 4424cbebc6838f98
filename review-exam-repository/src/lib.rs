//! # Review Exam Repository
//!
//! This crate provides the search engine capability interface used by the
//! ETL pipeline and the query tooling, a concrete OpenSearch implementation,
//! the index settings and mapping, and the startup readiness wait.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod readiness;

pub use config::SearchConfig;
pub use errors::SearchError;
pub use interfaces::{SearchEngineClient, SearchResponse};
pub use crate::opensearch::{IndexConfig, OpenSearchClient};
pub use readiness::{wait_until_ready, DnsResolver, HostResolver, RetryPolicy};
