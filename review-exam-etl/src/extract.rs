//! Extract step: read raw review rows from CSV.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::errors::EtlError;
use review_exam_shared::{fields, RawReview};

/// Read review rows from any CSV source.
///
/// The header row must name every dataset column; extra columns (such as
/// an unnamed row index) are ignored. Empty cells, and cells missing from
/// a short row, become `None`.
pub fn read_reviews<R: Read>(reader: R) -> Result<Vec<RawReview>, EtlError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = fields::ALL
        .iter()
        .filter(|field| !headers.iter().any(|header| header == **field))
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(EtlError::MissingColumns(missing));
    }

    reader
        .deserialize::<RawReview>()
        .map(|row| row.map_err(EtlError::from))
        .collect()
}

/// Read review rows from a CSV file on disk.
pub fn read_reviews_from_path(path: &Path) -> Result<Vec<RawReview>, EtlError> {
    info!(path = %path.display(), "Reading data");

    let file = File::open(path)
        .map_err(|e| EtlError::extract(format!("cannot open {}: {}", path.display(), e)))?;

    read_reviews(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = ",Clothing ID,Age,Title,Review Text,Rating,Recommended IND,Positive Feedback Count,Division Name,Department Name,Class Name";

    #[test]
    fn test_reads_rows_and_ignores_extra_columns() {
        let data = format!(
            "{}\n0,767,33,,Absolutely wonderful,4,1,0,Initmates,Intimate,Intimates\n1,1080,34,Love it,\"Fits, great\",5,1,4,General,Dresses,Dresses\n",
            HEADER
        );

        let rows = read_reviews(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].clothing_id.as_deref(), Some("767"));
        assert_eq!(rows[0].title, None);
        assert_eq!(rows[0].division_name.as_deref(), Some("Initmates"));
        assert_eq!(rows[1].review_text.as_deref(), Some("Fits, great"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let data = format!("{}\n0,,,,,,,,,,\n", HEADER);

        let rows = read_reviews(data.as_bytes()).unwrap();

        assert_eq!(rows, vec![RawReview::default()]);
    }

    #[test]
    fn test_short_rows_keep_their_leading_cells() {
        let data = format!(
            "{}\n0,767,33,Nice,Soft fabric,4,1,0,General,Tops,Knits\n1,1080,41,Short\n",
            HEADER
        );

        let rows = read_reviews(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rating.as_deref(), Some("4"));
        assert_eq!(rows[1].clothing_id.as_deref(), Some("1080"));
        assert_eq!(rows[1].age.as_deref(), Some("41"));
        assert_eq!(rows[1].title.as_deref(), Some("Short"));
        assert_eq!(rows[1].rating, None);
        assert_eq!(rows[1].class_name, None);
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let data = "Title,Review Text,Age\nHi,There,30\n";

        let err = read_reviews(data.as_bytes()).unwrap_err();

        match err {
            EtlError::MissingColumns(missing) => {
                assert!(missing.contains(&"Rating".to_string()));
                assert!(missing.contains(&"Clothing ID".to_string()));
                assert!(!missing.contains(&"Age".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = read_reviews_from_path(Path::new("/nonexistent/reviews.csv"));
        assert!(matches!(result, Err(EtlError::ExtractError(_))));
    }
}
