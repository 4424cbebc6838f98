//! Orchestrator for the review ETL.
//!
//! Runs extract, transform, index setup and bulk load in order against
//! a connected search client.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::EtlError;
use crate::extract::{read_reviews, read_reviews_from_path};
use crate::loader::{IndexManager, LoadSummary, LoaderConfig};
use crate::transform::{transform, TransformSummary};
use review_exam_repository::{
    wait_until_ready, DnsResolver, IndexConfig, OpenSearchClient, RetryPolicy, SearchConfig,
    SearchEngineClient,
};
use review_exam_shared::RawReview;

/// How the ETL prepares the index before loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexMode {
    /// Drop the index if present and create it again.
    #[default]
    Recreate,
    /// Keep an existing index and append to it.
    CreateIfAbsent,
}

/// What one ETL run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlReport {
    pub index: String,
    pub transform: TransformSummary,
    /// Whether the index was created during this run.
    pub index_created: bool,
    pub load: LoadSummary,
}

/// Runs the ETL steps against one index.
pub struct EtlService {
    manager: IndexManager,
    mode: IndexMode,
}

impl EtlService {
    /// Create a service over an already connected client.
    pub fn new(
        client: Arc<dyn SearchEngineClient>,
        index: IndexConfig,
        loader: LoaderConfig,
        mode: IndexMode,
    ) -> Self {
        Self {
            manager: IndexManager::with_config(client, index, loader),
            mode,
        }
    }

    /// Build an OpenSearch client and wait until the service is reachable.
    #[instrument(skip(config, policy), fields(url = %config.url()))]
    pub async fn connect(
        config: &SearchConfig,
        policy: &RetryPolicy,
    ) -> Result<Arc<dyn SearchEngineClient>, EtlError> {
        let client: Arc<dyn SearchEngineClient> = Arc::new(OpenSearchClient::new(&config.url())?);

        wait_until_ready(config, &DnsResolver, client.as_ref(), policy).await?;
        info!(url = %config.url(), "Connected to search service");

        Ok(client)
    }

    /// Run the ETL over a CSV file.
    pub async fn run(&self, path: &Path) -> Result<EtlReport, EtlError> {
        let rows = read_reviews_from_path(path)?;
        self.run_rows(rows).await
    }

    /// Run the ETL over any CSV source.
    pub async fn run_reader<R: Read>(&self, reader: R) -> Result<EtlReport, EtlError> {
        let rows = read_reviews(reader)?;
        self.run_rows(rows).await
    }

    #[instrument(skip(self, rows), fields(index = %self.manager.index_name(), mode = ?self.mode))]
    async fn run_rows(&self, rows: Vec<RawReview>) -> Result<EtlReport, EtlError> {
        let output = transform(rows);

        let index_created = match self.mode {
            IndexMode::Recreate => {
                self.manager.recreate_index().await?;
                true
            }
            IndexMode::CreateIfAbsent => self.manager.create_index_if_absent().await?,
        };

        let load = self.manager.bulk_load(&output.documents).await?;

        info!(
            index = %self.manager.index_name(),
            rows_read = output.summary.rows_read,
            dropped = output.summary.dropped,
            documents = load.documents,
            "ETL complete"
        );

        Ok(EtlReport {
            index: self.manager.index_name().to_string(),
            transform: output.summary,
            index_created,
            load,
        })
    }
}
