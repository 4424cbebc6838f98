//! Identity of the submission being graded, taken from the CI environment.

use chrono::{DateTime, Local};
use serde::Serialize;

const UNKNOWN: &str = "Unknown";

/// Informational header fields for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentInfo {
    pub name: String,
    pub pr_number: String,
    pub branch: String,
    /// First 8 characters of the commit hash.
    pub commit: String,
    pub date: String,
}

impl StudentInfo {
    /// Read `GITHUB_ACTOR`, `GITHUB_PR_NUMBER`, `GITHUB_HEAD_REF` and
    /// `GITHUB_SHA`, stamped with the local time.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), Local::now())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, now: DateTime<Local>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            name: var("GITHUB_ACTOR", "Student"),
            pr_number: var("GITHUB_PR_NUMBER", UNKNOWN),
            branch: var("GITHUB_HEAD_REF", UNKNOWN),
            commit: var("GITHUB_SHA", UNKNOWN).chars().take(8).collect(),
            date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
