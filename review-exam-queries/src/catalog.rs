//! Query catalog file format.
//!
//! The catalog is a JSON array of `{ "name", "description", "body" }`
//! objects, kept in task order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::QueryCatalogError;

/// Names of the exam tasks, in order.
pub const QUERY_NAMES: [&str; 15] = [
    "q2_1", "q2_2", "q2_3", "q2_4", "q2_5", "q2_6", "q3", "q4_1", "q4_2", "q4_3", "q4_4", "q5_1",
    "q5_2", "q5_3", "q5_4",
];

/// Default location of the catalog, relative to the repository root.
pub const DEFAULT_CATALOG_PATH: &str = "queries/exam_queries.json";

/// One student query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Search request body. Anything other than a non-empty JSON object is
    /// reported by validation.
    #[serde(default)]
    pub body: Value,
}

impl QueryEntry {
    /// A query with no body, or with an empty object body.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// The ordered list of student queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryCatalog {
    entries: Vec<QueryEntry>,
}

impl QueryCatalog {
    pub fn new(entries: Vec<QueryEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, QueryCatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self, QueryCatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| QueryCatalogError::read(format!("{}: {}", path.display(), e)))?;

        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), queries = catalog.len(), "Loaded query catalog");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[QueryEntry] {
        &self.entries
    }

    /// Look up a query by task name.
    pub fn get(&self, name: &str) -> Option<&QueryEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
