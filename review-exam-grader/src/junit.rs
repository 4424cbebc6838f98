//! JUnit XML test report reader.
//!
//! Reads every `testcase` element at any depth. A case is PASSED unless
//! it carries a `failure`, `error` or `skipped` child; when several are
//! present the first in that order wins.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{error, info, warn};

use crate::errors::GraderError;
use crate::results::{GradeBook, TestStatus};

/// One `testcase` element.
#[derive(Debug, Clone, PartialEq)]
pub struct JunitCase {
    pub name: String,
    pub class_name: String,
    pub time_secs: f64,
    pub status: TestStatus,
    pub message: String,
}

/// Cases read before the end of the document or the first error.
#[derive(Debug)]
pub struct ParseOutcome {
    pub cases: Vec<JunitCase>,
    pub error: Option<GraderError>,
}

/// Read a results file into a grade book.
///
/// Never fails: a missing file yields an empty book and malformed XML
/// keeps the cases read before the error. Both are logged.
pub fn parse_results(path: &Path) -> GradeBook {
    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Results file not found");
            return GradeBook::new();
        }
    };

    let outcome = parse_junit_str(&xml);
    if let Some(e) = &outcome.error {
        error!(path = %path.display(), error = %e, kept = outcome.cases.len(), "Failed to parse results");
    }

    info!(path = %path.display(), tests = outcome.cases.len(), "Parsed test results");
    GradeBook::from_cases(outcome.cases)
}

/// Parse JUnit XML text.
pub fn parse_junit_str(xml: &str) -> ParseOutcome {
    let mut cases = Vec::new();
    let error = read_cases(xml, &mut cases).err();
    ParseOutcome { cases, error }
}

fn read_cases(xml: &str, cases: &mut Vec<JunitCase>) -> Result<(), GraderError> {
    let mut reader = Reader::from_str(xml);
    let mut current: Option<JunitCase> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            GraderError::parse(format!("at position {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(element) if element.local_name().as_ref() == b"testcase" => {
                current = open_case(&element)?;
            }
            Event::Empty(element) if element.local_name().as_ref() == b"testcase" => {
                cases.extend(open_case(&element)?);
            }
            Event::Start(element) | Event::Empty(element) => {
                if let Some(case) = current.as_mut() {
                    apply_marker(case, &element)?;
                }
            }
            Event::End(element) if element.local_name().as_ref() == b"testcase" => {
                cases.extend(current.take());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(GraderError::parse("unterminated testcase element"));
    }
    Ok(())
}

fn open_case(element: &BytesStart<'_>) -> Result<Option<JunitCase>, GraderError> {
    let Some(name) = attribute(element, "name")? else {
        warn!("Skipping testcase without a name");
        return Ok(None);
    };

    let time_secs = attribute(element, "time")?
        .and_then(|time| time.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(Some(JunitCase {
        name,
        class_name: attribute(element, "classname")?.unwrap_or_default(),
        time_secs,
        status: TestStatus::Passed,
        message: String::new(),
    }))
}

fn marker_status(element: &BytesStart<'_>) -> Option<TestStatus> {
    match element.local_name().as_ref() {
        b"failure" => Some(TestStatus::Failed),
        b"error" => Some(TestStatus::Error),
        b"skipped" => Some(TestStatus::Skipped),
        _ => None,
    }
}

/// Lower is stronger.
fn precedence(status: TestStatus) -> u8 {
    match status {
        TestStatus::Failed => 0,
        TestStatus::Error => 1,
        TestStatus::Skipped => 2,
        TestStatus::Passed => 3,
    }
}

fn apply_marker(case: &mut JunitCase, element: &BytesStart<'_>) -> Result<(), GraderError> {
    let Some(status) = marker_status(element) else {
        return Ok(());
    };

    if precedence(status) < precedence(case.status) {
        case.status = status;
        case.message = attribute(element, "message")?.unwrap_or_default();
    }
    Ok(())
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, GraderError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| GraderError::parse(e.to_string()))?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|e| GraderError::parse(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<testsuites>
  <testsuite name="pytest" errors="1" failures="1" skipped="1" tests="5">
    <testcase classname="tests.test_elastic_search" name="test_index_exists" time="0.012" />
    <testcase classname="tests.test_elastic_search" name="test_null_values" time="0.340">
      <failure message="assert 3 == 0">AssertionError: missing values &lt; expected</failure>
    </testcase>
    <testcase classname="tests.test_elastic_search" name="test_age_stats" time="0.100">
      <error message="fixture &apos;es&apos; failed" />
    </testcase>
    <testcase classname="tests.test_elastic_search" name="test_best_reviews" time="0">
      <skipped message="not implemented" type="pytest.skip" />
    </testcase>
    <testcase classname="tests.test_elastic_search" name="test_worst_reviews">
      <system-out>ok</system-out>
    </testcase>
  </testsuite>
</testsuites>
"#;

    #[test]
    fn test_parses_statuses_and_attributes() {
        let outcome = parse_junit_str(REPORT);

        assert!(outcome.error.is_none());
        assert_eq!(outcome.cases.len(), 5);

        let statuses: Vec<TestStatus> = outcome.cases.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                TestStatus::Passed,
                TestStatus::Failed,
                TestStatus::Error,
                TestStatus::Skipped,
                TestStatus::Passed
            ]
        );

        let null_values = &outcome.cases[1];
        assert_eq!(null_values.class_name, "tests.test_elastic_search");
        assert_eq!(null_values.time_secs, 0.34);
        assert_eq!(null_values.message, "assert 3 == 0");
        assert_eq!(outcome.cases[2].message, "fixture 'es' failed");
        assert_eq!(outcome.cases[4].time_secs, 0.0);
    }

    #[test]
    fn test_failure_outranks_other_markers() {
        let xml = r#"<testsuite>
            <testcase name="test_a"><skipped message="s"/><error message="e"/><failure message="f"/></testcase>
            <testcase name="test_b"><skipped message="s"/><error message="e"/></testcase>
        </testsuite>"#;

        let outcome = parse_junit_str(xml);

        assert_eq!(outcome.cases[0].status, TestStatus::Failed);
        assert_eq!(outcome.cases[0].message, "f");
        assert_eq!(outcome.cases[1].status, TestStatus::Error);
    }

    #[test]
    fn test_malformed_xml_keeps_parsed_cases() {
        let xml = r#"<testsuite>
            <testcase name="test_index_exists" time="0.1"/>
            <testcase name="test_data_loaded"></testsuite>"#;

        let outcome = parse_junit_str(xml);

        assert!(outcome.error.is_some());
        assert_eq!(outcome.cases.len(), 1);
        assert_eq!(outcome.cases[0].name, "test_index_exists");
    }

    #[test]
    fn test_missing_file_gives_empty_book() {
        let book = parse_results(Path::new("/nonexistent/pytest-results.xml"));
        assert!(book.is_empty());
    }

    #[test]
    fn test_parse_results_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REPORT.as_bytes()).unwrap();

        let book = parse_results(file.path());

        assert_eq!(book.len(), 5);
        assert_eq!(book.get("test_best_reviews").unwrap().awarded, 12.5);
        assert_eq!(book.count(TestStatus::Passed), 2);
    }
}
