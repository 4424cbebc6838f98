//! Interface definitions for the search engine client.
//!
//! This module defines the abstract `SearchEngineClient` trait so the ETL
//! pipeline and the query tooling can run against OpenSearch/Elasticsearch
//! or an in-memory mock.

mod search_engine_client;

pub use search_engine_client::{SearchEngineClient, SearchResponse};
