//! Command line and environment configuration.
//!
//! Search service settings come from the environment (optionally a `.env`
//! file) and can be overridden per flag.

mod logging;

pub use logging::init_tracing;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::ExamError;
use review_exam_etl::{IndexMode, LoaderConfig};
use review_exam_repository::opensearch::INDEX_NAME;
use review_exam_repository::{RetryPolicy, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "review-exam")]
#[command(about = "Clothing review search exam: load data, check queries, grade results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the review CSV into the search index
    Etl(EtlArgs),
    /// Grade a JUnit XML results file and write the exam report
    Grade(GradeArgs),
    /// Check the student query catalog, then run it against the index
    ValidateQueries(ValidateArgs),
}

// Unset flags fall back to ELASTICSEARCH_HOST, ELASTICSEARCH_PORT and ELASTICSEARCH_SCHEME.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Search service host
    #[arg(long)]
    pub host: Option<String>,

    /// Search service port
    #[arg(long)]
    pub port: Option<u16>,

    /// URL scheme (http or https)
    #[arg(long)]
    pub scheme: Option<String>,

    /// Index name
    #[arg(long, env = "EXAM_INDEX", default_value = INDEX_NAME)]
    pub index: String,
}

impl ConnectionArgs {
    pub fn search_config(&self) -> SearchConfig {
        self.apply(SearchConfig::from_env())
    }

    fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(scheme) = &self.scheme {
            config.scheme = scheme.clone();
        }
        config
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeArg {
    /// Drop and recreate the index
    #[default]
    Recreate,
    /// Keep an existing index and append
    CreateIfAbsent,
}

impl From<ModeArg> for IndexMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Recreate => IndexMode::Recreate,
            ModeArg::CreateIfAbsent => IndexMode::CreateIfAbsent,
        }
    }
}

#[derive(Args, Debug)]
pub struct EtlArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// CSV file to load
    #[arg(long, env = "EXAM_DATA_FILE", default_value = "data/Womens_Clothing.csv")]
    pub data: PathBuf,

    /// How to prepare the index
    #[arg(long, value_enum, default_value_t = ModeArg::Recreate)]
    pub mode: ModeArg,

    /// Documents per bulk request
    #[arg(long, default_value_t = 1000)]
    pub batch_size: usize,

    /// Attempts per readiness phase (resolve, then ping)
    #[arg(long, default_value_t = 60)]
    pub max_attempts: u32,

    /// Seconds between readiness attempts
    #[arg(long, default_value_t = 1)]
    pub retry_interval_secs: u64,
}

impl EtlArgs {
    pub fn loader_config(&self) -> Result<LoaderConfig, ExamError> {
        if self.batch_size == 0 {
            return Err(ExamError::config("--batch-size must be at least 1"));
        }
        Ok(LoaderConfig {
            batch_size: self.batch_size,
        })
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy, ExamError> {
        if self.max_attempts == 0 {
            return Err(ExamError::config("--max-attempts must be at least 1"));
        }
        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_secs(self.retry_interval_secs),
        })
    }
}

#[derive(Args, Debug)]
pub struct GradeArgs {
    /// JUnit XML results file
    #[arg(long, default_value = "test-results/pytest-results.xml")]
    pub results: PathBuf,

    /// Markdown report destination
    #[arg(long, default_value = "exam-report.md")]
    pub output: PathBuf,

    /// Also write a JSON summary here
    #[arg(long)]
    pub json_output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Query catalog file
    #[arg(long, default_value = review_exam_queries::catalog::DEFAULT_CATALOG_PATH)]
    pub queries: PathBuf,

    /// Only check the catalog structure
    #[arg(long)]
    pub skip_execution: bool,
}

/// Load `.env` from the working directory or its parents, if present.
///
/// Runs before logging is set up so `RUST_LOG` may come from the file.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_environment_config() {
        let args = ConnectionArgs {
            host: Some("localhost".to_string()),
            port: None,
            scheme: Some("https".to_string()),
            index: INDEX_NAME.to_string(),
        };
        let base = SearchConfig {
            host: "elasticsearch".to_string(),
            port: 9201,
            scheme: "http".to_string(),
        };

        let config = args.apply(base);

        assert_eq!(config.url(), "https://localhost:9201");
    }

    #[test]
    fn test_etl_defaults() {
        let cli = Cli::parse_from(["review-exam", "etl", "--data", "reviews.csv"]);

        let Command::Etl(args) = cli.command else {
            panic!("expected etl command");
        };
        assert_eq!(args.mode, ModeArg::Recreate);
        assert_eq!(args.loader_config().unwrap().batch_size, 1000);
        assert_eq!(args.retry_policy().unwrap(), RetryPolicy::default());
        assert!(!cli.log_json);
    }

    #[test]
    fn test_etl_rejects_zero_batch_size() {
        let cli = Cli::parse_from([
            "review-exam",
            "etl",
            "--mode",
            "create-if-absent",
            "--batch-size",
            "0",
        ]);

        let Command::Etl(args) = cli.command else {
            panic!("expected etl command");
        };
        assert_eq!(IndexMode::from(args.mode), IndexMode::CreateIfAbsent);
        assert!(matches!(args.loader_config(), Err(ExamError::ConfigError(_))));
    }
}
