//! # Review Exam Grader
//!
//! Turns a JUnit XML test report into a weighted score and a markdown
//! report suitable for a pull request comment.
//!
//! 1. [`junit`] reads test cases and their status
//! 2. [`rubric`] holds the point table and the report categories
//! 3. [`results`] computes awarded points and the overall score
//! 4. [`report`] renders the markdown and JSON reports

pub mod errors;
pub mod junit;
pub mod report;
pub mod results;
pub mod rubric;
pub mod student;

pub use errors::GraderError;
pub use junit::{parse_junit_str, parse_results, JunitCase, ParseOutcome};
pub use report::{render_json, render_markdown, write_reports};
pub use results::{CategorySummary, GradeBook, TestResult, TestStatus};
pub use rubric::PASS_THRESHOLD;
pub use student::StudentInfo;
