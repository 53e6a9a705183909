//! CSV ingest for the prediction table.
//!
//! The loader validates the header against the required schema, parses rows
//! into [`Bar`]s, and rejects the series before simulation if timestamps are
//! not strictly increasing or any bar fails its sanity checks.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::schema::validate_headers;
use crate::domain::Bar;

/// Errors from the input data layer. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse input CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("input is missing required columns: {0}")]
    MissingColumns(String),

    #[error("row {row}: unparseable timestamp '{value}'")]
    BadTimestamp { row: usize, value: String },

    #[error("row {row}: timestamp {timestamp} does not increase over the previous row")]
    NonMonotonicTimestamps {
        row: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("row {row}: bar fails OHLC sanity checks")]
    InsaneBar { row: usize },

    #[error("row {row}: signal column out of range (prediction/probability/rsi/volatility)")]
    SignalOutOfRange { row: usize },
}

/// One CSV row before timestamp parsing.
#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    rsi: f64,
    macd: f64,
    ema_fast: f64,
    ema_slow: f64,
    #[serde(rename = "return")]
    ret: f64,
    volatility: f64,
    prediction: u8,
    prediction_probability: f64,
}

/// Load and validate the prediction table from a CSV file.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = std::fs::File::open(path)?;
    read_bars(file)
}

/// Load and validate the prediction table from any reader.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    validate_headers(&headers)?;

    let mut bars = Vec::new();
    for (row_index, record) in csv_reader.deserialize::<RawRecord>().enumerate() {
        // Header is row 0 in the file; data rows report 1-based positions.
        let row = row_index + 1;
        let raw = record?;
        let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| DataError::BadTimestamp {
            row,
            value: raw.timestamp.clone(),
        })?;
        bars.push(Bar {
            timestamp,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
            rsi: raw.rsi,
            macd: raw.macd,
            ema_fast: raw.ema_fast,
            ema_slow: raw.ema_slow,
            ret: raw.ret,
            volatility: raw.volatility,
            prediction: raw.prediction,
            prediction_probability: raw.prediction_probability,
        });
    }

    validate_series(&bars)?;
    Ok(bars)
}

/// Pre-simulation series checks: strictly increasing timestamps, sane OHLC,
/// in-range signal columns. An empty series is valid (it just yields no
/// trades).
pub fn validate_series(bars: &[Bar]) -> Result<(), DataError> {
    for (index, bar) in bars.iter().enumerate() {
        let row = index + 1;
        if !bar.is_sane() {
            return Err(DataError::InsaneBar { row });
        }
        if !bar.signal_in_range() {
            return Err(DataError::SignalOutOfRange { row });
        }
        if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
            return Err(DataError::NonMonotonicTimestamps {
                row,
                timestamp: bar.timestamp,
            });
        }
    }
    Ok(())
}

/// Parse a timestamp in RFC 3339, `%Y-%m-%d %H:%M:%S`, or bare-date form.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "timestamp,open,high,low,close,volume,rsi,macd,ema_fast,ema_slow,return,volatility,prediction,prediction_probability";

    fn row(ts: &str, close: f64) -> String {
        format!("{ts},{close},{high},{low},{close},1000,55,0.2,101,100,0.001,1.2,1,0.6",
            high = close + 1.0,
            low = close - 1.0,
        )
    }

    #[test]
    fn loads_well_formed_csv() {
        let csv = format!(
            "{HEADER}\n{}\n{}\n",
            row("2024-01-02 00:00:00", 100.0),
            row("2024-01-02 01:00:00", 101.0),
        );
        let bars = read_bars(csv.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(
            bars[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(bars[1].close, 101.0);
        assert_eq!(bars[0].ret, 0.001);
    }

    #[test]
    fn missing_column_is_fatal() {
        let header_without_rsi = HEADER.replace("rsi,", "");
        let csv = format!("{header_without_rsi}\n");
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumns(ref cols) if cols.contains("rsi")));
    }

    #[test]
    fn non_monotonic_timestamps_rejected() {
        let csv = format!(
            "{HEADER}\n{}\n{}\n",
            row("2024-01-02 01:00:00", 100.0),
            row("2024-01-02 00:00:00", 101.0),
        );
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataError::NonMonotonicTimestamps { row: 2, .. }
        ));
    }

    #[test]
    fn duplicate_timestamps_rejected() {
        let csv = format!(
            "{HEADER}\n{}\n{}\n",
            row("2024-01-02 00:00:00", 100.0),
            row("2024-01-02 00:00:00", 101.0),
        );
        assert!(read_bars(csv.as_bytes()).is_err());
    }

    #[test]
    fn unparseable_timestamp_reported_with_row() {
        let csv = format!("{HEADER}\n{}\n", row("yesterday-ish", 100.0));
        let err = read_bars(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::BadTimestamp { row: 1, .. }));
    }

    #[test]
    fn rfc3339_and_bare_date_accepted() {
        assert!(parse_timestamp("2024-01-02T03:04:05Z").is_some());
        assert!(parse_timestamp("2024-01-02").is_some());
        assert!(parse_timestamp("02/01/2024").is_none());
    }

    #[test]
    fn empty_table_is_valid() {
        let csv = format!("{HEADER}\n");
        let bars = read_bars(csv.as_bytes()).unwrap();
        assert!(bars.is_empty());
    }
}
