//! # Review Exam Shared
//!
//! Types shared by the ETL pipeline and the search repository: the raw CSV
//! row, the normalized review document and the column names of the clothing
//! review dataset.

mod review;

pub use review::{fields, RawReview, ReviewDocument, AGE_UNKNOWN, UNKNOWN_CATEGORY};
