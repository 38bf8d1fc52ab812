//! Raw tabular input as it arrives from a catalog file.

use crate::error::{KeplerError, Result};
use std::io::Read;
use std::path::Path;

/// Untyped table: a header row and string cells.
///
/// Cells are `None` when the source held no value. Column names are kept
/// exactly as written; cleaning them is the normalizer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table, checking that every row matches the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        for row in &rows {
            if row.len() != headers.len() {
                return Err(KeplerError::DimensionMismatch {
                    expected: headers.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    /// Build a table from string literals; empty cells become missing.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Result<Self> {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| to_cell(cell)).collect())
                .collect(),
        )
    }

    /// Read a comma-separated table with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(to_cell).collect());
        }

        Self::new(headers, rows)
    }

    /// Read a CSV file from disk.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Column names as written in the source.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }
}

fn to_cell(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_reader() {
        let text = "KOI,TTVPeriod,SNR\n1.01,2.47,40.2\n2.01,,12\n";
        let table = RawTable::from_csv_reader(text.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["KOI", "TTVPeriod", "SNR"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.rows()[1][1], None);
        assert_eq!(table.rows()[1][2].as_deref(), Some("12"));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = RawTable::from_strs(&["a", "b"], &[&["1"]]);
        assert!(matches!(
            result,
            Err(KeplerError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_ragged_csv_rejected() {
        let text = "a,b\n1,2\n3\n";
        assert!(RawTable::from_csv_reader(text.as_bytes()).is_err());
    }

    #[test]
    fn test_header_only_is_empty() {
        let table = RawTable::from_csv_reader("koi,snr\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.n_columns(), 2);
    }
}
