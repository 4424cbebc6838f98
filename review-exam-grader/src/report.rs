//! Markdown and JSON reports.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::errors::GraderError;
use crate::results::{CategorySummary, GradeBook, TestResult, TestStatus};
use crate::rubric::PASS_THRESHOLD;
use crate::student::StudentInfo;

/// Render the pull request comment.
pub fn render_markdown(book: &GradeBook, student: &StudentInfo) -> String {
    let score = book.score();
    let status_emoji = if book.is_passing() { "✅" } else { "❌" };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("## {} Search Exam Report", status_emoji));
    lines.push(String::new());
    lines.push(format!(
        "**Student:** {} | **PR:** #{} | **Branch:** `{}` | **Commit:** `{}` | **Date:** {}",
        student.name, student.pr_number, student.branch, student.commit, student.date
    ));
    lines.push(String::new());
    lines.push(format!("**Final score: {:.1}%**", score));
    lines.push(String::new());

    lines.push("### 📊 Summary".to_string());
    lines.push(format!("- ✅ Passed: {}", book.count(TestStatus::Passed)));
    lines.push(format!(
        "- ❌ Failed: {}",
        book.count(TestStatus::Failed) + book.count(TestStatus::Error)
    ));
    lines.push(format!("- ⏭️ Skipped: {}", book.count(TestStatus::Skipped)));
    lines.push(format!("- 📝 Total: {}", book.len()));
    lines.push(String::new());

    lines.push("### 📋 Breakdown by category".to_string());
    lines.push(String::new());
    lines.push("| Category | Tests | Points | Status |".to_string());
    lines.push("|----------|-------|--------|--------|".to_string());
    for category in book.category_summaries() {
        lines.push(category_row(&category));
    }
    lines.push(String::new());

    if book.is_passing() {
        lines.push("### 🎉 Congratulations!".to_string());
        lines.push(format!(
            "Your exam is validated with a score of at least {:.0}%. The pull request can be merged.",
            PASS_THRESHOLD
        ));
    } else {
        lines.push("### 📝 Action required".to_string());
        lines.push("Your exam needs corrections. Tests to review:".to_string());
        lines.push(String::new());
        for result in book.needs_attention() {
            lines.push(attention_line(result));
        }
        lines.push(String::new());
        lines.push("**Tips:**".to_string());
        lines.push("- Check your queries in `queries/exam_queries.json`".to_string());
        lines.push("- Run `review-exam validate-queries` against your local index".to_string());
    }
    lines.push(String::new());

    lines.join("\n")
}

fn category_row(category: &CategorySummary) -> String {
    let icon = if category.all_passed() { "✅" } else { "⚠️" };
    format!(
        "| {} | {}/{} | {}/{} | {} |",
        category.name,
        category.passed,
        category.total,
        format_points(category.awarded),
        category.max_points,
        icon
    )
}

fn attention_line(result: &TestResult) -> String {
    if result.status == TestStatus::Error {
        format!("- ❌ {} (error)", result.name)
    } else {
        format!("- ❌ {}", result.name)
    }
}

/// Whole points print without a decimal part.
fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

#[derive(Serialize)]
struct Counts {
    passed: usize,
    failed: usize,
    errors: usize,
    skipped: usize,
    total: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    student: &'a StudentInfo,
    score: f64,
    passed: bool,
    threshold: f64,
    awarded_points: f64,
    max_points: u32,
    counts: Counts,
    categories: Vec<CategorySummary>,
    tests: Vec<&'a TestResult>,
}

/// Render the machine-readable summary.
pub fn render_json(book: &GradeBook, student: &StudentInfo) -> Result<String, GraderError> {
    let report = JsonReport {
        student,
        score: book.score(),
        passed: book.is_passing(),
        threshold: PASS_THRESHOLD,
        awarded_points: book.awarded_points(),
        max_points: book.max_points(),
        counts: Counts {
            passed: book.count(TestStatus::Passed),
            failed: book.count(TestStatus::Failed),
            errors: book.count(TestStatus::Error),
            skipped: book.count(TestStatus::Skipped),
            total: book.len(),
        },
        categories: book.category_summaries(),
        tests: book.results().collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write the markdown report and, when a path is given, the JSON report.
pub fn write_reports(
    book: &GradeBook,
    student: &StudentInfo,
    markdown_path: &Path,
    json_path: Option<&Path>,
) -> Result<(), GraderError> {
    write_file(markdown_path, &render_markdown(book, student))?;
    info!(path = %markdown_path.display(), "Markdown report written");

    if let Some(json_path) = json_path {
        write_file(json_path, &render_json(book, student)?)?;
        info!(path = %json_path.display(), "JSON report written");
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), GraderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| GraderError::write(format!("{}: {}", parent.display(), e)))?;
    }
    fs::write(path, contents).map_err(|e| GraderError::write(format!("{}: {}", path.display(), e)))
}
