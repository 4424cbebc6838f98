//! Transform step: normalize raw rows into review documents.
//!
//! The transform never fails. Rows without a usable rating are dropped,
//! every other bad value degrades to a default.

use tracing::{debug, info};

use review_exam_shared::{RawReview, ReviewDocument, AGE_UNKNOWN, UNKNOWN_CATEGORY};

const MIN_AGE: f64 = 0.0;
const MAX_AGE: f64 = 100.0;
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Known misspellings of Division Name values, matched case-insensitively.
const DIVISION_SYNONYMS: &[(&str, &str)] = &[("initmates", "Intimates")];

/// Counters describing one transform pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformSummary {
    pub rows_read: usize,
    pub kept: usize,
    pub dropped: usize,
}

/// Documents produced by [`transform`] plus the pass counters.
#[derive(Debug, Clone, Default)]
pub struct TransformOutput {
    pub documents: Vec<ReviewDocument>,
    pub summary: TransformSummary,
}

/// Transform every row, dropping those without a numeric rating.
pub fn transform(rows: Vec<RawReview>) -> TransformOutput {
    let rows_read = rows.len();
    let documents: Vec<ReviewDocument> = rows.iter().filter_map(transform_row).collect();

    let summary = TransformSummary {
        rows_read,
        kept: documents.len(),
        dropped: rows_read - documents.len(),
    };

    info!(
        rows_read = summary.rows_read,
        kept = summary.kept,
        dropped = summary.dropped,
        "Transformed rows"
    );

    TransformOutput { documents, summary }
}

/// Transform a single row. Returns `None` when the rating is missing or
/// not numeric.
pub fn transform_row(row: &RawReview) -> Option<ReviewDocument> {
    let Some(rating) = parse_number(row.rating.as_deref()) else {
        debug!(rating = ?row.rating, "Dropping row without numeric rating");
        return None;
    };

    Some(ReviewDocument {
        title: clean_text(row.title.as_deref()),
        review_text: clean_text(row.review_text.as_deref()),
        division_name: normalize_division(&clean_category(row.division_name.as_deref())),
        department_name: clean_category(row.department_name.as_deref()),
        class_name: clean_category(row.class_name.as_deref()),
        age: clean_age(row.age.as_deref()),
        rating: rating.clamp(MIN_RATING, MAX_RATING).trunc() as i64,
        recommended_ind: clean_integer(row.recommended_ind.as_deref()),
        positive_feedback_count: clean_integer(row.positive_feedback_count.as_deref()),
        clothing_id: clean_integer(row.clothing_id.as_deref()),
    })
}

/// Parse a finite number, accepting surrounding whitespace.
fn parse_number(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn clean_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn clean_category(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_string()
}

fn normalize_division(value: &str) -> String {
    DIVISION_SYNONYMS
        .iter()
        .find(|(variant, _)| value.eq_ignore_ascii_case(variant))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn clean_age(value: Option<&str>) -> i64 {
    match parse_number(value) {
        Some(age) if age == AGE_UNKNOWN as f64 => AGE_UNKNOWN,
        Some(age) => age.clamp(MIN_AGE, MAX_AGE).trunc() as i64,
        None => AGE_UNKNOWN,
    }
}

fn clean_integer(value: Option<&str>) -> i64 {
    parse_number(value).map_or(0, |number| number.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rating: Option<&str>) -> RawReview {
        RawReview {
            title: Some("  Great dress ".to_string()),
            review_text: Some("Fits PERFECTLY".to_string()),
            division_name: Some("General".to_string()),
            department_name: Some("Dresses".to_string()),
            class_name: Some("Dresses".to_string()),
            age: Some("34".to_string()),
            rating: rating.map(str::to_string),
            recommended_ind: Some("1".to_string()),
            positive_feedback_count: Some("4".to_string()),
            clothing_id: Some("1080".to_string()),
        }
    }

    #[test]
    fn test_rows_without_numeric_rating_are_dropped() {
        let rows = vec![row(Some("abc")), row(None), row(Some("4")), row(Some(" "))];

        let output = transform(rows);

        assert_eq!(output.documents.len(), 1);
        assert_eq!(output.documents[0].rating, 4);
        assert_eq!(
            output.summary,
            TransformSummary {
                rows_read: 4,
                kept: 1,
                dropped: 3
            }
        );
    }

    #[test]
    fn test_rating_is_clamped_and_truncated() {
        let ratings: Vec<i64> = ["0", "7", "3.9", "-2", "5"]
            .iter()
            .filter_map(|r| transform_row(&row(Some(*r))))
            .map(|doc| doc.rating)
            .collect();

        assert_eq!(ratings, vec![1, 5, 3, 1, 5]);
    }

    #[test]
    fn test_age_rules() {
        let age_of = |age: Option<&str>| {
            let mut raw = row(Some("3"));
            raw.age = age.map(str::to_string);
            transform_row(&raw).unwrap().age
        };

        assert_eq!(age_of(Some("200")), 100);
        assert_eq!(age_of(Some("-5")), 0);
        assert_eq!(age_of(Some("41.7")), 41);
        assert_eq!(age_of(Some("forty")), AGE_UNKNOWN);
        assert_eq!(age_of(None), AGE_UNKNOWN);
        assert_eq!(age_of(Some("-1")), AGE_UNKNOWN);
    }

    #[test]
    fn test_text_and_categories() {
        let mut raw = row(Some("5"));
        raw.title = None;
        raw.division_name = Some(" INITMATES ".to_string());
        raw.department_name = None;
        raw.class_name = Some(" Knits ".to_string());

        let doc = transform_row(&raw).unwrap();

        assert_eq!(doc.title, "");
        assert_eq!(doc.review_text, "Fits PERFECTLY");
        assert_eq!(doc.division_name, "Intimates");
        assert_eq!(doc.department_name, UNKNOWN_CATEGORY);
        assert_eq!(doc.class_name, "Knits");
    }

    #[test]
    fn test_other_integers_default_to_zero() {
        let mut raw = row(Some("2"));
        raw.recommended_ind = Some("yes".to_string());
        raw.positive_feedback_count = None;
        raw.clothing_id = Some("12.8".to_string());

        let doc = transform_row(&raw).unwrap();

        assert_eq!(doc.recommended_ind, 0);
        assert_eq!(doc.positive_feedback_count, 0);
        assert_eq!(doc.clothing_id, 12);
    }

    #[test]
    fn test_non_finite_values_are_not_numeric() {
        assert!(transform_row(&row(Some("NaN"))).is_none());
        assert!(transform_row(&row(Some("inf"))).is_none());
    }

    #[test]
    fn test_transform_is_idempotent() {
        let mut unusual = row(Some("9"));
        unusual.age = Some("abc".to_string());
        unusual.division_name = Some("initmates".to_string());
        unusual.title = None;
        unusual.class_name = None;

        let first = transform(vec![row(Some("4.5")), unusual]).documents;
        let again = transform(first.iter().map(RawReview::from).collect()).documents;

        assert_eq!(first, again);
    }

    #[test]
    fn test_invariants_hold_for_mixed_input() {
        let inputs = ["-10", "0", "1", "2.2", "5", "6", "1e3", "x", ""];
        let rows: Vec<RawReview> = inputs
            .iter()
            .flat_map(|rating| {
                inputs.iter().map(move |age| {
                    let mut raw = row(Some(*rating));
                    raw.age = Some(age.to_string());
                    raw
                })
            })
            .collect();

        let output = transform(rows);

        assert!(!output.documents.is_empty());
        for doc in &output.documents {
            assert!((1..=5).contains(&doc.rating));
            assert!(doc.age == AGE_UNKNOWN || (0..=100).contains(&doc.age));
        }
    }
}
