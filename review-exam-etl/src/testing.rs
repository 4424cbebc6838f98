//! In-memory search client shared by the loader and orchestrator tests.

use std::sync::Mutex;

use async_trait::async_trait;
use review_exam_repository::{SearchEngineClient, SearchError, SearchResponse};
use review_exam_shared::ReviewDocument;
use serde_json::Value;

/// Records every call and stores written documents.
#[derive(Default)]
pub struct RecordingClient {
    pub exists: Mutex<bool>,
    /// 1-based bulk call number that should fail, if any.
    pub fail_on_batch: Option<usize>,
    pub calls: Mutex<Vec<String>>,
    pub batches: Mutex<Vec<Vec<ReviewDocument>>>,
}

impl RecordingClient {
    pub fn with_existing_index() -> Self {
        Self {
            exists: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn failing_on_batch(batch: usize) -> Self {
        Self {
            fail_on_batch: Some(batch),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn documents(&self) -> Vec<ReviewDocument> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl SearchEngineClient for RecordingClient {
    async fn ping(&self) -> Result<bool, SearchError> {
        self.record("ping");
        Ok(true)
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        self.record(format!("exists {}", index));
        Ok(*self.exists.lock().unwrap())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        self.record(format!("delete {}", index));
        *self.exists.lock().unwrap() = false;
        Ok(())
    }

    async fn create_index(&self, index: &str, _body: &Value) -> Result<(), SearchError> {
        self.record(format!("create {}", index));
        *self.exists.lock().unwrap() = true;
        Ok(())
    }

    async fn bulk_write(
        &self,
        index: &str,
        documents: &[ReviewDocument],
    ) -> Result<usize, SearchError> {
        self.record(format!("bulk {} {}", index, documents.len()));
        let mut batches = self.batches.lock().unwrap();
        if self.fail_on_batch == Some(batches.len() + 1) {
            return Err(SearchError::bulk_index("mapper_parsing_exception"));
        }
        batches.push(documents.to_vec());
        Ok(documents.len())
    }

    async fn refresh(&self, index: &str) -> Result<(), SearchError> {
        self.record(format!("refresh {}", index));
        Ok(())
    }

    async fn search(&self, index: &str, _body: &Value) -> Result<SearchResponse, SearchError> {
        self.record(format!("search {}", index));
        Ok(SearchResponse {
            took_ms: 1,
            total_hits: Some(0),
            aggregations: None,
        })
    }
}
