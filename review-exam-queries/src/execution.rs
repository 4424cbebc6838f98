//! Run the catalog against the live index.

use tracing::{info, instrument, warn};

use crate::catalog::QueryCatalog;
use crate::errors::QueryCatalogError;
use review_exam_repository::SearchEngineClient;

/// What happened to one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Executed { took_ms: u64 },
    /// Empty queries are not sent.
    Skipped,
    Failed(String),
}

/// One query and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRun {
    pub name: String,
    pub outcome: QueryOutcome,
}

/// Outcomes for the whole catalog, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub runs: Vec<QueryRun>,
}

impl ExecutionReport {
    /// Number of queries that ran successfully.
    pub fn executed(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| matches!(run.outcome, QueryOutcome::Executed { .. }))
            .count()
    }

    /// Number of non-empty queries that were sent.
    pub fn attempted(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| run.outcome != QueryOutcome::Skipped)
            .count()
    }

    /// At least one query executed.
    pub fn is_success(&self) -> bool {
        self.executed() > 0
    }
}

/// Ping the service, check the index, then run every non-empty query.
///
/// A failing query is recorded and the run goes on. An unreachable
/// service or a missing index stops the run with an error.
#[instrument(skip(client, catalog), fields(queries = catalog.len()))]
pub async fn execute_catalog(
    client: &dyn SearchEngineClient,
    index: &str,
    catalog: &QueryCatalog,
) -> Result<ExecutionReport, QueryCatalogError> {
    match client.ping().await {
        Ok(true) => {}
        Ok(false) => {
            return Err(QueryCatalogError::ServiceUnavailable(
                "ping was not acknowledged".to_string(),
            ))
        }
        Err(e) => return Err(QueryCatalogError::ServiceUnavailable(e.to_string())),
    }

    if !client.index_exists(index).await? {
        return Err(QueryCatalogError::IndexNotFound(index.to_string()));
    }

    let mut report = ExecutionReport::default();
    for entry in catalog.entries() {
        let outcome = if entry.is_empty() {
            QueryOutcome::Skipped
        } else {
            match client.search(index, &entry.body).await {
                Ok(response) => {
                    info!(query = %entry.name, took_ms = response.took_ms, "Query executed");
                    QueryOutcome::Executed {
                        took_ms: response.took_ms,
                    }
                }
                Err(e) => {
                    warn!(query = %entry.name, error = %e, "Query failed");
                    QueryOutcome::Failed(e.to_string())
                }
            }
        };

        report.runs.push(QueryRun {
            name: entry.name.clone(),
            outcome,
        });
    }

    info!(
        executed = report.executed(),
        attempted = report.attempted(),
        "Query execution finished"
    );
    Ok(report)
}
