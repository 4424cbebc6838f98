//! Structural checks on the query catalog. No search service needed.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{QueryCatalog, QUERY_NAMES};

/// A problem found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIssue {
    /// The body is not a JSON object.
    NotAnObject { name: String },
    /// The body is missing or an empty object.
    Empty { name: String },
    /// An expected task has no entry.
    Missing { name: String },
    /// An entry names no known task.
    Unknown { name: String },
    /// The same task appears more than once.
    Duplicate { name: String },
}

impl fmt::Display for QueryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject { name } => write!(f, "{}: body is not a JSON object", name),
            Self::Empty { name } => write!(f, "{}: empty query", name),
            Self::Missing { name } => write!(f, "{}: missing from the catalog", name),
            Self::Unknown { name } => write!(f, "{}: unknown query name", name),
            Self::Duplicate { name } => write!(f, "{}: defined more than once", name),
        }
    }
}

/// Result of validating a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Entries whose body passed the checks, in catalog order.
    pub valid: Vec<String>,
    pub issues: Vec<QueryIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every entry's body, then the set of task names.
pub fn validate_catalog(catalog: &QueryCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen = HashSet::new();

    for entry in catalog.entries() {
        let name = entry.name.clone();

        if !seen.insert(entry.name.as_str()) {
            report.issues.push(QueryIssue::Duplicate { name: name.clone() });
        }
        if !QUERY_NAMES.contains(&entry.name.as_str()) {
            report.issues.push(QueryIssue::Unknown { name: name.clone() });
        }

        if entry.is_empty() {
            report.issues.push(QueryIssue::Empty { name });
        } else if !matches!(entry.body, Value::Object(_)) {
            report.issues.push(QueryIssue::NotAnObject { name });
        } else {
            debug!(query = %name, "Query syntax OK");
            report.valid.push(name);
        }
    }

    for expected in QUERY_NAMES {
        if !seen.contains(expected) {
            report.issues.push(QueryIssue::Missing {
                name: expected.to_string(),
            });
        }
    }

    for issue in &report.issues {
        warn!(issue = %issue, "Invalid query catalog entry");
    }

    report
}
