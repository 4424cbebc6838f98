//! Search engine client trait definition.
//!
//! This module defines the capability interface the harness needs from the
//! search service: liveness, index lifecycle, bulk writes, refresh and
//! aggregation search.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use review_exam_shared::ReviewDocument;

/// The parts of a search response the harness looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Server-side execution time in milliseconds.
    pub took_ms: u64,
    /// Total hit count, when the service reports one.
    pub total_hits: Option<u64>,
    /// The `aggregations` object, if the query asked for any.
    pub aggregations: Option<Value>,
}

impl SearchResponse {
    /// Extract the interesting parts of a raw search response body.
    pub fn from_body(body: &Value) -> Result<Self, SearchError> {
        let took_ms = body
            .get("took")
            .and_then(Value::as_u64)
            .ok_or_else(|| SearchError::parse("search response has no 'took' field"))?;

        // `hits.total` is an object on 7.x+ and a bare number on older servers
        let total_hits = body.get("hits").and_then(|h| h.get("total")).and_then(|t| {
            t.as_u64()
                .or_else(|| t.get("value").and_then(Value::as_u64))
        });

        Ok(Self {
            took_ms,
            total_hits,
            aggregations: body.get("aggregations").cloned(),
        })
    }
}

/// Abstract interface for search engine operations.
///
/// Implementations can be swapped for different backends (OpenSearch, mock, etc.)
/// which keeps the ETL and query code testable without a running cluster.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow sharing behind an `Arc`.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Liveness probe.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The service answered
    /// * `Ok(false)` - The service answered with a non-success status
    /// * `Err(SearchError)` - The request could not be sent
    async fn ping(&self) -> Result<bool, SearchError>;

    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Delete an index.
    async fn delete_index(&self, index: &str) -> Result<(), SearchError>;

    /// Create an index with the given settings and mappings body.
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError>;

    /// Write a batch of documents in a single bulk request.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of documents written
    /// * `Err(SearchError::BulkIndexError)` - If the request or any item failed
    async fn bulk_write(
        &self,
        index: &str,
        documents: &[ReviewDocument],
    ) -> Result<usize, SearchError>;

    /// Refresh an index so that written documents become searchable.
    async fn refresh(&self, index: &str) -> Result<(), SearchError>;

    /// Run a search/aggregation body against an index.
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_from_body() {
        let body = json!({
            "took": 12,
            "hits": { "total": { "value": 23486, "relation": "eq" }, "hits": [] },
            "aggregations": { "unique_division_name": { "value": 4 } }
        });

        let response = SearchResponse::from_body(&body).unwrap();

        assert_eq!(response.took_ms, 12);
        assert_eq!(response.total_hits, Some(23486));
        assert_eq!(
            response.aggregations.unwrap()["unique_division_name"]["value"],
            4
        );
    }

    #[test]
    fn test_search_response_legacy_total() {
        let body = json!({ "took": 3, "hits": { "total": 10, "hits": [] } });

        let response = SearchResponse::from_body(&body).unwrap();

        assert_eq!(response.total_hits, Some(10));
        assert!(response.aggregations.is_none());
    }

    #[test]
    fn test_search_response_without_took() {
        let result = SearchResponse::from_body(&json!({ "error": "boom" }));

        assert!(matches!(result, Err(SearchError::ParseError(_))));
    }
}
