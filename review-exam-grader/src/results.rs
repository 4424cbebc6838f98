//! Test outcomes and scoring.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::junit::JunitCase;
use crate::rubric::{self, CATEGORIES, PASS_THRESHOLD};

/// Outcome of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
    Error,
    Skipped,
}

impl TestStatus {
    /// Fraction of the maximum points this status earns.
    fn credit(self) -> f64 {
        match self {
            Self::Passed => 1.0,
            Self::Skipped => 0.5,
            Self::Failed | Self::Error => 0.0,
        }
    }

    /// The test ran and did not pass.
    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
            Self::Skipped => "SKIPPED",
        };
        f.write_str(label)
    }
}

/// A graded test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub class_name: String,
    pub time_secs: f64,
    pub status: TestStatus,
    pub message: String,
    pub max_points: u32,
    pub awarded: f64,
}

impl From<JunitCase> for TestResult {
    fn from(case: JunitCase) -> Self {
        let max_points = rubric::max_points(&case.name);
        Self {
            awarded: f64::from(max_points) * case.status.credit(),
            name: case.name,
            class_name: case.class_name,
            time_secs: case.time_secs,
            status: case.status,
            message: case.message,
            max_points,
        }
    }
}

/// Pass/point totals for one report category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub passed: usize,
    pub total: usize,
    pub awarded: f64,
    pub max_points: u32,
}

impl CategorySummary {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// All graded tests, keyed by test name.
///
/// A later result for the same name replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradeBook {
    results: BTreeMap<String, TestResult>,
}

impl GradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade a list of parsed test cases.
    pub fn from_cases(cases: impl IntoIterator<Item = JunitCase>) -> Self {
        let mut book = Self::new();
        for case in cases {
            book.insert(TestResult::from(case));
        }
        book
    }

    pub fn insert(&mut self, result: TestResult) {
        self.results.insert(result.name.clone(), result);
    }

    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.get(name)
    }

    pub fn results(&self) -> impl Iterator<Item = &TestResult> {
        self.results.values()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of tests with the given status.
    pub fn count(&self, status: TestStatus) -> usize {
        self.results().filter(|r| r.status == status).count()
    }

    pub fn awarded_points(&self) -> f64 {
        self.results().map(|r| r.awarded).sum()
    }

    pub fn max_points(&self) -> u32 {
        self.results().map(|r| r.max_points).sum()
    }

    /// Awarded over maximum points of the encountered tests, in percent.
    /// Zero when no test was encountered.
    pub fn score(&self) -> f64 {
        let max = self.max_points();
        if max == 0 {
            return 0.0;
        }
        self.awarded_points() * 100.0 / f64::from(max)
    }

    pub fn is_passing(&self) -> bool {
        self.score() >= PASS_THRESHOLD
    }

    /// Process exit status for CI: 0 when passing, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_passing() {
            0
        } else {
            1
        }
    }

    /// Failed and errored tests, in name order.
    pub fn needs_attention(&self) -> Vec<&TestResult> {
        self.results()
            .filter(|r| r.status.needs_attention())
            .collect()
    }

    /// Totals for each category that has at least one encountered test.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        CATEGORIES
            .iter()
            .filter_map(|(category, tests)| {
                let found: Vec<&TestResult> =
                    tests.iter().filter_map(|name| self.get(name)).collect();
                if found.is_empty() {
                    return None;
                }

                Some(CategorySummary {
                    name: category.to_string(),
                    passed: found
                        .iter()
                        .filter(|r| r.status == TestStatus::Passed)
                        .count(),
                    total: found.len(),
                    awarded: found.iter().map(|r| r.awarded).sum(),
                    max_points: found.iter().map(|r| r.max_points).sum(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, status: TestStatus) -> JunitCase {
        JunitCase {
            name: name.to_string(),
            class_name: "tests.test_elastic_search".to_string(),
            time_secs: 0.1,
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_empty_book_scores_zero() {
        let book = GradeBook::new();

        assert_eq!(book.score(), 0.0);
        assert_eq!(book.exit_code(), 1);
        assert!(book.category_summaries().is_empty());
    }

    #[test]
    fn test_all_passed_scores_hundred() {
        let book = GradeBook::from_cases(
            rubric::POINT_TABLE
                .iter()
                .map(|(name, _)| case(name, TestStatus::Passed)),
        );

        assert_eq!(book.score(), 100.0);
        assert_eq!(book.exit_code(), 0);
        assert_eq!(book.category_summaries().len(), CATEGORIES.len());
    }

    #[test]
    fn test_skipped_awards_exactly_half() {
        let book = GradeBook::from_cases(vec![
            case("test_unique_class_names", TestStatus::Skipped),
            case("test_best_reviews", TestStatus::Skipped),
        ]);

        assert_eq!(book.get("test_unique_class_names").unwrap().awarded, 2.5);
        assert_eq!(book.get("test_best_reviews").unwrap().awarded, 12.5);
        assert_eq!(book.score(), 50.0);
    }

    #[test]
    fn test_weighted_score_below_threshold() {
        // 5 + 10 + 15 points, only the 15-point test passes
        let book = GradeBook::from_cases(vec![
            case("test_unique_division_names", TestStatus::Failed),
            case("test_products_by_department", TestStatus::Error),
            case("test_departments_by_division", TestStatus::Passed),
        ]);

        assert_eq!(book.score(), 50.0);
        assert!(!book.is_passing());
        assert_eq!(book.exit_code(), 1);
        let names: Vec<&str> = book
            .needs_attention()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["test_products_by_department", "test_unique_division_names"]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 20 of 25 points
        let book = GradeBook::from_cases(vec![
            case("test_best_rated_terms", TestStatus::Passed),
            case("test_extra_check", TestStatus::Failed),
        ]);

        assert_eq!(book.score(), 80.0);
        assert_eq!(book.exit_code(), 0);
    }

    #[test]
    fn test_unknown_tests_count_but_are_not_categorized() {
        let book = GradeBook::from_cases(vec![
            case("test_bonus", TestStatus::Passed),
            case("test_index_exists", TestStatus::Failed),
        ]);

        assert_eq!(book.max_points(), 15);
        let summaries = book.category_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "ETL & Setup");
        assert_eq!(summaries[0].total, 1);
        assert!(!summaries[0].all_passed());
    }

    #[test]
    fn test_later_result_replaces_earlier() {
        let book = GradeBook::from_cases(vec![
            case("test_age_stats", TestStatus::Failed),
            case("test_age_stats", TestStatus::Passed),
        ]);

        assert_eq!(book.len(), 1);
        assert_eq!(book.score(), 100.0);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let value = serde_json::to_value(TestStatus::Skipped).unwrap();
        assert_eq!(value, "SKIPPED");
    }
}
