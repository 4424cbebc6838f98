//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::{SearchEngineClient, SearchResponse};
use review_exam_shared::ReviewDocument;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200")?;
/// let config = IndexConfig::default();
/// client.create_index(&config.name, &config.index_body()).await?;
/// client.bulk_write(&config.name, &documents).await?;
/// client.refresh(&config.name).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// No request is sent here; reachability is checked by the readiness wait.
    ///
    /// # Arguments
    ///
    /// * `url` - The server URL (e.g., "http://elasticsearch:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| SearchError::connection(format!("Invalid URL {}: {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(url = %url, "Created OpenSearch client");

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Turn a non-success response into an error built by `make_error`.
    async fn ensure_success(
        response: Response,
        action: &str,
        make_error: fn(String) -> SearchError,
    ) -> Result<Response, SearchError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "{} request failed", action);
        Err(make_error(format!(
            "{} failed with status {}: {}",
            action, status, error_body
        )))
    }
}

/// Build the newline-delimited bulk body: an action line followed by the
/// document source, for every document.
///
/// Document ids are left to the server.
fn build_bulk_body(index: &str, documents: &[ReviewDocument]) -> Result<Vec<Value>, SearchError> {
    let mut body = Vec::with_capacity(documents.len() * 2);

    for doc in documents {
        body.push(json!({ "index": { "_index": index } }));
        body.push(
            serde_json::to_value(doc).map_err(|e| SearchError::serialization(e.to_string()))?,
        );
    }

    Ok(body)
}

/// Check a bulk response body for item failures.
fn check_bulk_response(body: &Value) -> Result<(), SearchError> {
    if !body.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(());
    }

    let items = body
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let failed: Vec<&Value> = items
        .iter()
        .filter_map(|item| item.get("index").and_then(|i| i.get("error")))
        .collect();

    let first_reason = failed
        .first()
        .and_then(|e| e.get("reason"))
        .and_then(Value::as_str)
        .unwrap_or("unknown reason");

    Err(SearchError::bulk_index(format!(
        "{} of {} documents failed, first error: {}",
        failed.len(),
        items.len(),
        first_reason
    )))
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn ping(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchError::index(format!(
                "Unexpected status {} checking index {}",
                status, index
            ))),
        }
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index_deletion(e.to_string()))?;

        Self::ensure_success(response, "Delete index", SearchError::IndexDeletionError).await?;

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        Self::ensure_success(response, "Create index", SearchError::IndexCreationError).await?;

        debug!(index = %index, "Index created");
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_write(
        &self,
        index: &str,
        documents: &[ReviewDocument],
    ) -> Result<usize, SearchError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let body: Vec<JsonBody<Value>> = build_bulk_body(index, documents)?
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let response = Self::ensure_success(response, "Bulk", SearchError::BulkIndexError).await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        check_bulk_response(&response_body)?;

        debug!(count = documents.len(), "Bulk write succeeded");
        Ok(documents.len())
    }

    async fn refresh(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        Self::ensure_success(response, "Refresh", SearchError::IndexError).await?;
        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let response = Self::ensure_success(response, "Search", SearchError::QueryError).await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        SearchResponse::from_body(&response_body)
    }
}
