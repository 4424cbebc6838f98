//! Review row and document types.

use serde::{Deserialize, Serialize};

/// Age stored for reviews whose age could not be read.
pub const AGE_UNKNOWN: i64 = -1;

/// Category label stored when a categorical field is missing.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Column names of the dataset, which are also the document field names in the index.
pub mod fields {
    pub const TITLE: &str = "Title";
    pub const REVIEW_TEXT: &str = "Review Text";
    pub const DIVISION_NAME: &str = "Division Name";
    pub const DEPARTMENT_NAME: &str = "Department Name";
    pub const CLASS_NAME: &str = "Class Name";
    pub const AGE: &str = "Age";
    pub const RATING: &str = "Rating";
    pub const RECOMMENDED_IND: &str = "Recommended IND";
    pub const POSITIVE_FEEDBACK_COUNT: &str = "Positive Feedback Count";
    pub const CLOTHING_ID: &str = "Clothing ID";

    /// Every column the input file must provide.
    pub const ALL: [&str; 10] = [
        TITLE,
        REVIEW_TEXT,
        DIVISION_NAME,
        DEPARTMENT_NAME,
        CLASS_NAME,
        AGE,
        RATING,
        RECOMMENDED_IND,
        POSITIVE_FEEDBACK_COUNT,
        CLOTHING_ID,
    ];
}

/// One row of the input CSV, exactly as read.
///
/// Every field is optional text: an empty cell deserializes to `None` and
/// numeric columns are kept as strings until the transform coerces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawReview {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Review Text")]
    pub review_text: Option<String>,
    #[serde(rename = "Division Name")]
    pub division_name: Option<String>,
    #[serde(rename = "Department Name")]
    pub department_name: Option<String>,
    #[serde(rename = "Class Name")]
    pub class_name: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<String>,
    #[serde(rename = "Recommended IND")]
    pub recommended_ind: Option<String>,
    #[serde(rename = "Positive Feedback Count")]
    pub positive_feedback_count: Option<String>,
    #[serde(rename = "Clothing ID")]
    pub clothing_id: Option<String>,
}

/// A normalized review, ready to be written to the search index.
///
/// Serialized field names match the dataset columns so that the index mapping
/// and the student queries address the same names as the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDocument {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Review Text")]
    pub review_text: String,
    #[serde(rename = "Division Name")]
    pub division_name: String,
    #[serde(rename = "Department Name")]
    pub department_name: String,
    #[serde(rename = "Class Name")]
    pub class_name: String,
    /// Reviewer age in `[0, 100]`, or [`AGE_UNKNOWN`].
    #[serde(rename = "Age")]
    pub age: i64,
    /// Star rating in `[1, 5]`.
    #[serde(rename = "Rating")]
    pub rating: i64,
    #[serde(rename = "Recommended IND")]
    pub recommended_ind: i64,
    #[serde(rename = "Positive Feedback Count")]
    pub positive_feedback_count: i64,
    #[serde(rename = "Clothing ID")]
    pub clothing_id: i64,
}

impl From<&ReviewDocument> for RawReview {
    fn from(doc: &ReviewDocument) -> Self {
        Self {
            title: Some(doc.title.clone()),
            review_text: Some(doc.review_text.clone()),
            division_name: Some(doc.division_name.clone()),
            department_name: Some(doc.department_name.clone()),
            class_name: Some(doc.class_name.clone()),
            age: Some(doc.age.to_string()),
            rating: Some(doc.rating.to_string()),
            recommended_ind: Some(doc.recommended_ind.to_string()),
            positive_feedback_count: Some(doc.positive_feedback_count.to_string()),
            clothing_id: Some(doc.clothing_id.to_string()),
        }
    }
}
