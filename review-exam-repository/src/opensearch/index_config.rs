//! Index settings and mappings for the review index.

use serde_json::{json, Value};

use review_exam_shared::fields;

/// The name of the review index the exam queries run against.
pub const INDEX_NAME: &str = "eval_new";

/// Name of the custom analyzer applied to the free-text fields.
pub const REVIEW_ANALYZER: &str = "review_analyzer";

/// Index name and sharding for the review index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub name: String,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: INDEX_NAME.to_string(),
            number_of_shards: 1,
            number_of_replicas: 0,
        }
    }
}

impl IndexConfig {
    /// Create a config for a custom index name with the default sharding.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the settings and mappings body used to create the index.
    ///
    /// The configuration includes:
    /// - **Integer fields**: age, rating, recommendation flag, feedback count, clothing id
    /// - **Keyword fields**: division, department and class, for terms/cardinality aggregations
    /// - **Text fields**: title and review body with `review_analyzer` and a `.keyword`
    ///   sub-field for exact aggregations
    ///
    /// # Sharding Configuration
    ///
    /// A single primary shard with no replica: the exam runs on a one-node cluster
    /// and exact aggregation counts are easier to grade on one shard.
    pub fn index_body(&self) -> Value {
        let text_field = json!({
            "type": "text",
            "analyzer": REVIEW_ANALYZER,
            "fields": {
                "keyword": {
                    "type": "keyword",
                    "ignore_above": 256
                }
            }
        });

        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas,
                "analysis": {
                    "analyzer": {
                        (REVIEW_ANALYZER): {
                            "type": "custom",
                            "tokenizer": "standard",
                            "filter": ["lowercase", "asciifolding", "stop"]
                        }
                    }
                }
            },
            "mappings": {
                "properties": {
                    (fields::AGE): { "type": "integer" },
                    (fields::RATING): { "type": "integer" },
                    (fields::RECOMMENDED_IND): { "type": "integer" },
                    (fields::POSITIVE_FEEDBACK_COUNT): { "type": "integer" },
                    (fields::CLOTHING_ID): { "type": "integer" },
                    (fields::DIVISION_NAME): { "type": "keyword" },
                    (fields::DEPARTMENT_NAME): { "type": "keyword" },
                    (fields::CLASS_NAME): { "type": "keyword" },
                    (fields::TITLE): text_field.clone(),
                    (fields::REVIEW_TEXT): text_field
                }
            }
        })
    }
}
