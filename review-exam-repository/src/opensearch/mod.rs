//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using the OpenSearch client, which speaks the same REST API as the
//! Elasticsearch 7.x service the exam runs against.

mod client;
mod index_config;

pub use client::OpenSearchClient;
pub use index_config::{IndexConfig, INDEX_NAME, REVIEW_ANALYZER};
