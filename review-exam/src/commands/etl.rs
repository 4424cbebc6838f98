//! `review-exam etl`

use colored::*;
use tracing::info;

use crate::config::EtlArgs;
use crate::ExamError;
use review_exam_etl::EtlService;
use review_exam_repository::IndexConfig;

/// Wait for the search service, then load the CSV into the index.
pub async fn run_etl(args: &EtlArgs) -> Result<i32, ExamError> {
    let loader = args.loader_config()?;
    let policy = args.retry_policy()?;
    let search = args.connection.search_config();

    if !args.data.is_file() {
        return Err(ExamError::config(format!(
            "data file {} not found",
            args.data.display()
        )));
    }

    info!(
        url = %search.url(),
        index = %args.connection.index,
        data = %args.data.display(),
        mode = ?args.mode,
        "Starting ETL"
    );

    let client = EtlService::connect(&search, &policy).await?;
    let service = EtlService::new(
        client,
        IndexConfig::new(args.connection.index.as_str()),
        loader,
        args.mode.into(),
    );

    let report = service.run(&args.data).await?;

    println!(
        "{} {} documents loaded into '{}' in {} batches ({} of {} rows dropped)",
        "✓".green(),
        report.load.documents,
        report.index,
        report.load.batches,
        report.transform.dropped,
        report.transform.rows_read
    );
    Ok(0)
}
