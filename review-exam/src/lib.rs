//! # Review Exam
//!
//! Command line harness for the clothing review search exam.
//!
//! This crate wires configuration, logging and the three commands:
//! loading the dataset, checking the student queries and grading test
//! results.

pub mod commands;
pub mod config;

pub use config::{Cli, Command};

use thiserror::Error;

/// Errors surfaced by the commands.
#[derive(Error, Debug)]
pub enum ExamError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// ETL error.
    #[error("ETL error: {0}")]
    EtlError(#[from] review_exam_etl::EtlError),

    /// Query catalog error.
    #[error("Query catalog error: {0}")]
    QueryCatalogError(#[from] review_exam_queries::QueryCatalogError),

    /// Grader error.
    #[error("Grader error: {0}")]
    GraderError(#[from] review_exam_grader::GraderError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] review_exam_repository::SearchError),
}

impl ExamError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
