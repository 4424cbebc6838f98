//! `review-exam grade`

use colored::*;

use crate::config::GradeArgs;
use crate::ExamError;
use review_exam_grader::{parse_results, write_reports, StudentInfo};

/// Grade the results file and write the reports. Exit status 0 when the
/// score reaches the pass threshold.
pub fn run_grade(args: &GradeArgs) -> Result<i32, ExamError> {
    let book = parse_results(&args.results);
    let student = StudentInfo::from_env();

    write_reports(&book, &student, &args.output, args.json_output.as_deref())?;

    let summary = format!("Report generated - final score: {:.1}%", book.score());
    if book.is_passing() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
    println!("  {}", args.output.display());

    Ok(book.exit_code())
}
