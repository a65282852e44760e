//! CSV data source.
//!
//! This is the normalization boundary for incoming tabular data: every
//! value becomes a plain `i64`/`f64` exactly once here, rows with missing
//! values are dropped, and the output series is validated. The simulation
//! core never sees wrapped or unparsed values.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use quantbt_core::error::DataError;
use quantbt_core::traits::DataSource;
use quantbt_core::types::{Bar, BarSeries};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close", default)]
    close: Option<f64>,
}

/// CSV data source for historical bars.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load the whole file as a validated bar series.
    pub fn load_series(&self, symbol: &str) -> Result<BarSeries, DataError> {
        let bars = self.load_bars()?;
        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(BarSeries::from_bars(symbol, bars)?)
    }

    fn load_bars(&self) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();
        let mut skipped = 0usize;

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            // Rows with a missing or non-numeric close are dropped, the
            // same way the upstream table would drop NA rows
            let close = match record.close {
                Some(value) if value.is_finite() => value,
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let timestamp = parse_timestamp(&record.date)?;
            bars.push(Bar::new(timestamp, close));
        }

        if skipped > 0 {
            debug!(path = %self.path.display(), skipped, "dropped rows with missing values");
        }

        // Sort by timestamp
        bars.sort_by_key(|b| b.timestamp);

        Ok(bars)
    }
}

/// Parse various timestamp formats.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            let dt = d.and_hms_opt(0, 0, 0).unwrap();
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp; assume milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn get_historical_bars(
        &self,
        _symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError> {
        let bars = self.load_bars()?;
        let start = start.timestamp_millis();
        let end = end.timestamp_millis();

        Ok(bars
            .into_iter()
            .filter(|b| b.timestamp >= start && b.timestamp < end)
            .collect())
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("1705312800000").is_ok()); // Unix ms
        assert!(parse_timestamp("1705312800").is_ok()); // Unix sec
        assert!(parse_timestamp("not-a-date").is_err());
    }

    #[test]
    fn test_load_series_sorted_and_normalized() {
        let file = write_csv(
            "Date,Close\n2024-01-03,11.5\n2024-01-01,10.0\n2024-01-02,10.5\n",
        );
        let source = CsvDataSource::new(file.path()).unwrap();

        let series = source.load_series("TEST").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 10.5, 11.5]);
    }

    #[test]
    fn test_rows_with_missing_close_are_dropped() {
        let file = write_csv("Date,Close\n2024-01-01,10.0\n2024-01-02,\n2024-01-03,11.0\n");
        let source = CsvDataSource::new(file.path()).unwrap();

        let series = source.load_series("TEST").unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_negative_close_is_fatal() {
        let file = write_csv("Date,Close\n2024-01-01,10.0\n2024-01-02,-1.0\n");
        let source = CsvDataSource::new(file.path()).unwrap();

        assert!(matches!(
            source.load_series("TEST"),
            Err(DataError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvDataSource::new("/nonexistent/data.csv"),
            Err(DataError::NoDataAvailable)
        ));
    }

    #[tokio::test]
    async fn test_get_historical_bars_range() {
        let file = write_csv(
            "Date,Close\n2024-01-01,10.0\n2024-01-02,10.5\n2024-01-03,11.0\n",
        );
        let source = CsvDataSource::new(file.path()).unwrap();

        let start = "2024-01-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2024-01-03T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let bars = source
            .get_historical_bars("TEST", start, end)
            .await
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.5);
    }
}
