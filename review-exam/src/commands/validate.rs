//! `review-exam validate-queries`

use colored::*;

use crate::config::ValidateArgs;
use crate::ExamError;
use review_exam_queries::{
    execute_catalog, validate_catalog, QueryCatalog, QueryCatalogError, QueryOutcome,
};
use review_exam_repository::OpenSearchClient;

/// Check the catalog structure, then run the queries unless told not to.
pub async fn run_validate(args: &ValidateArgs) -> Result<i32, ExamError> {
    let catalog = QueryCatalog::load(&args.queries)?;

    println!("Checking query syntax...");
    let validation = validate_catalog(&catalog);
    for name in &validation.valid {
        println!("{} {}: syntax OK", "✓".green(), name);
    }

    if !validation.is_valid() {
        println!("\n{}", "Problems found in the query catalog:".red());
        for issue in &validation.issues {
            println!("  {} {}", "✗".red(), issue);
        }
        println!("Fix these before running the queries.");
        return Ok(1);
    }

    if args.skip_execution {
        println!("\n{}", "Query catalog structure is valid.".green());
        return Ok(0);
    }

    println!("\nRunning queries...");
    let search = args.connection.search_config();
    let client = OpenSearchClient::new(&search.url())?;

    let report = match execute_catalog(&client, &args.connection.index, &catalog).await {
        Ok(report) => report,
        Err(e @ QueryCatalogError::ServiceUnavailable(_)) => {
            println!("{} {} at {}", "✗".red(), e, search.url());
            println!("Start the search service, then retry.");
            return Ok(1);
        }
        Err(e @ QueryCatalogError::IndexNotFound(_)) => {
            println!("{} {}", "✗".red(), e);
            println!("Load the data with `review-exam etl`.");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    for run in &report.runs {
        match &run.outcome {
            QueryOutcome::Executed { took_ms } => {
                println!("{} {}: executed ({}ms)", "✓".green(), run.name, took_ms)
            }
            QueryOutcome::Skipped => println!("{} {}: empty, skipped", "-".yellow(), run.name),
            QueryOutcome::Failed(reason) => println!("{} {}: {}", "✗".red(), run.name, reason),
        }
    }

    let summary = format!(
        "{}/{} queries executed successfully",
        report.executed(),
        report.attempted()
    );
    if report.is_success() {
        println!("\n{}", summary.green());
        Ok(0)
    } else {
        println!("\n{}", summary.red());
        Ok(1)
    }
}
