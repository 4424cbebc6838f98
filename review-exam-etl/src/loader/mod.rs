//! Loader module for the review ETL.
//!
//! Owns the index lifecycle (recreate or create-if-absent) and writes
//! documents to the search index in fixed-size bulk batches.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::errors::EtlError;
use review_exam_repository::{IndexConfig, SearchEngineClient};
use review_exam_shared::ReviewDocument;

/// Configuration for the bulk loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents sent in one bulk request.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

/// Outcome of a completed bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub batches: usize,
    pub documents: usize,
}

/// Index lifecycle and bulk loading against one index.
pub struct IndexManager {
    client: Arc<dyn SearchEngineClient>,
    index: IndexConfig,
    config: LoaderConfig,
}

impl IndexManager {
    /// Create a manager for the given index with the default batch size.
    pub fn new(client: Arc<dyn SearchEngineClient>, index: IndexConfig) -> Self {
        Self::with_config(client, index, LoaderConfig::default())
    }

    /// Create a manager with a custom loader configuration.
    pub fn with_config(
        client: Arc<dyn SearchEngineClient>,
        index: IndexConfig,
        config: LoaderConfig,
    ) -> Self {
        Self {
            client,
            index,
            config,
        }
    }

    /// Name of the managed index.
    pub fn index_name(&self) -> &str {
        &self.index.name
    }

    /// Delete the index if present, then create it with settings and mapping.
    ///
    /// Destructive: every document previously in the index is lost.
    #[instrument(skip(self), fields(index = %self.index.name))]
    pub async fn recreate_index(&self) -> Result<(), EtlError> {
        let name = &self.index.name;

        if self.client.index_exists(name).await? {
            info!(index = %name, "Deleting existing index");
            self.client.delete_index(name).await?;
        }

        self.create(name).await
    }

    /// Create the index only when it does not exist yet.
    ///
    /// Returns `true` when the index was created.
    #[instrument(skip(self), fields(index = %self.index.name))]
    pub async fn create_index_if_absent(&self) -> Result<bool, EtlError> {
        let name = &self.index.name;

        if self.client.index_exists(name).await? {
            info!(index = %name, "Index already exists, keeping it");
            return Ok(false);
        }

        self.create(name).await?;
        Ok(true)
    }

    async fn create(&self, name: &str) -> Result<(), EtlError> {
        self.client
            .create_index(name, &self.index.index_body())
            .await?;
        info!(index = %name, "Index created");
        Ok(())
    }

    /// Write documents in sequential batches, then refresh the index once.
    ///
    /// The first failing batch aborts the load; earlier batches stay written.
    #[instrument(skip(self, documents), fields(index = %self.index.name, document_count = documents.len()))]
    pub async fn bulk_load(&self, documents: &[ReviewDocument]) -> Result<LoadSummary, EtlError> {
        let name = &self.index.name;
        let batch_size = self.config.batch_size.max(1);
        let mut summary = LoadSummary::default();

        for (i, batch) in documents.chunks(batch_size).enumerate() {
            let batch_number = i + 1;

            let written = self.client.bulk_write(name, batch).await.map_err(|e| {
                error!(index = %name, batch = batch_number, error = %e, "Bulk write failed");
                EtlError::loader(format!(
                    "batch {} of index '{}' failed: {}",
                    batch_number, name, e
                ))
            })?;

            summary.batches += 1;
            summary.documents += written;
            debug!(batch = batch_number, written = written, "Batch written");
        }

        self.client.refresh(name).await?;

        info!(
            index = %name,
            batches = summary.batches,
            documents = summary.documents,
            "Bulk load complete"
        );
        Ok(summary)
    }
}
