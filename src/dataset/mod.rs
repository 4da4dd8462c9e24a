//! CSV post dataset loading and date-range filtering
//!
//! The dataset is a flat table with at least `created_at` and `full_text`
//! columns. `username`, `favorite_count` and `retweet_count` are read when
//! present. Timestamps are normalized to UTC.

use crate::models::Document;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const TIMESTAMP_COLUMN: &str = "created_at";
pub const TEXT_COLUMN: &str = "full_text";

/// Errors that can occur while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid timestamp on row {row}: {value}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Invalid number in column {column} on row {row}: {value}")]
    InvalidNumber {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("Invalid date range: start {0} is after end {1}")]
    InvalidDateRange(NaiveDate, NaiveDate),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Parse a post timestamp into UTC
///
/// Accepts RFC 3339, the Twitter export format
/// (`Mon Sep 08 14:55:09 +0000 2025`), `%Y-%m-%d %H:%M:%S%z`, and naive
/// `%Y-%m-%d %H:%M:%S` / `%Y-%m-%d` values, which are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%a %b %d %H:%M:%S %z %Y", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

struct Columns {
    timestamp: usize,
    text: usize,
    username: Option<usize>,
    favorite_count: Option<usize>,
    retweet_count: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> DatasetResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Ok(Self {
            timestamp: find(TIMESTAMP_COLUMN).ok_or(DatasetError::MissingColumn(TIMESTAMP_COLUMN))?,
            text: find(TEXT_COLUMN).ok_or(DatasetError::MissingColumn(TEXT_COLUMN))?,
            username: find("username"),
            favorite_count: find("favorite_count"),
            retweet_count: find("retweet_count"),
        })
    }
}

fn parse_count(
    record: &StringRecord,
    index: Option<usize>,
    column: &'static str,
    row: usize,
) -> DatasetResult<u64> {
    let Some(raw) = index.and_then(|i| record.get(i)).map(str::trim) else {
        return Ok(0);
    };
    if raw.is_empty() {
        return Ok(0);
    }
    // pandas exports integer columns with missing values as floats ("12.0")
    raw.parse::<u64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u64)
        })
        .ok_or_else(|| DatasetError::InvalidNumber {
            column,
            row,
            value: raw.to_string(),
        })
}

/// Read documents from CSV data with a header row
pub fn read_documents<R: Read>(reader: R) -> DatasetResult<Vec<Document>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::locate(reader.headers()?)?;
    let mut documents = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let raw_ts = record.get(columns.timestamp).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| DatasetError::InvalidTimestamp {
            row,
            value: raw_ts.to_string(),
        })?;

        let text = record
            .get(columns.text)
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);

        documents.push(Document {
            text,
            timestamp,
            username: columns
                .username
                .and_then(|i| record.get(i))
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            favorite_count: parse_count(&record, columns.favorite_count, "favorite_count", row)?,
            retweet_count: parse_count(&record, columns.retweet_count, "retweet_count", row)?,
        });
    }

    tracing::debug!(documents = documents.len(), "Read dataset records");
    Ok(documents)
}

/// Load documents from a CSV file
pub fn load_csv(path: &Path) -> DatasetResult<Vec<Document>> {
    let file = File::open(path)?;
    let documents = read_documents(file)?;
    tracing::info!(path = %path.display(), documents = documents.len(), "Loaded dataset");
    Ok(documents)
}

/// Inclusive range of UTC calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> DatasetResult<Self> {
        if start > end {
            return Err(DatasetError::InvalidDateRange(start, end));
        }
        Ok(Self { start, end })
    }

    /// Whether the document's day falls inside the range
    pub fn contains(&self, document: &Document) -> bool {
        let day = document.date();
        self.start <= day && day <= self.end
    }

    /// Keep documents inside the range, preserving order
    pub fn filter(&self, documents: Vec<Document>) -> Vec<Document> {
        let before = documents.len();
        let kept: Vec<Document> = documents.into_iter().filter(|d| self.contains(d)).collect();
        tracing::debug!(
            start = %self.start,
            end = %self.end,
            before,
            after = kept.len(),
            "Applied date range"
        );
        kept
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 9, 8, 14, 55, 9).unwrap();
        assert_eq!(parse_timestamp("Mon Sep 08 14:55:09 +0000 2025"), Some(expected));
        assert_eq!(parse_timestamp("2025-09-08T14:55:09Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-09-08 14:55:09+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-09-08 14:55:09"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-09-08"),
            Some(Utc.with_ymd_and_hms(2025, 9, 8, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_offset_normalized_to_utc() {
        let ts = parse_timestamp("2025-09-09T01:30:00+07:00").unwrap();
        assert_eq!(ts.date_naive(), date(9, 8));
    }

    #[test]
    fn test_read_documents() {
        let data = "\
username,created_at,full_text,favorite_count,retweet_count
alice,Mon Sep 08 14:55:09 +0000 2025,npm worm spreads,3,1
bob,2025-09-09 10:00:00,,,
carol,2025-09-10 10:00:00,\"patch, released\",2.0,0
";
        let documents = read_documents(data.as_bytes()).unwrap();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].text(), Some("npm worm spreads"));
        assert_eq!(documents[0].username.as_deref(), Some("alice"));
        assert_eq!(documents[0].favorite_count, 3);
        assert_eq!(documents[1].text(), None);
        assert_eq!(documents[1].retweet_count, 0);
        assert_eq!(documents[2].text(), Some("patch, released"));
        assert_eq!(documents[2].favorite_count, 2);
    }

    #[test]
    fn test_missing_column() {
        let data = "created_at,text\n2025-09-08,npm\n";
        assert!(matches!(
            read_documents(data.as_bytes()),
            Err(DatasetError::MissingColumn(TEXT_COLUMN))
        ));
    }

    #[test]
    fn test_invalid_timestamp_reports_row() {
        let data = "created_at,full_text\n2025-09-08,ok\nnot a date,bad\n";
        match read_documents(data.as_bytes()) {
            Err(DatasetError::InvalidTimestamp { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(date(9, 1), date(11, 30)).unwrap();
        assert_eq!(range.days(), 91);

        let documents = vec![
            Document::with_text("a", Utc.with_ymd_and_hms(2025, 8, 31, 23, 59, 59).unwrap()),
            Document::with_text("b", Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()),
            Document::with_text("c", Utc.with_ymd_and_hms(2025, 11, 30, 18, 0, 0).unwrap()),
            Document::with_text("d", Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap()),
        ];
        let kept = range.filter(documents);
        let texts: Vec<_> = kept.iter().filter_map(Document::text).collect();
        assert_eq!(texts, vec!["b", "c"]);

        assert!(DateRange::new(date(9, 2), date(9, 1)).is_err());
    }
}
