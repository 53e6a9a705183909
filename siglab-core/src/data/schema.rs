//! Required input columns and header validation.

use super::loader::DataError;

/// Columns the prediction table must provide. Missing any of them is a
/// fatal configuration error for the run.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "rsi",
    "macd",
    "ema_fast",
    "ema_slow",
    "return",
    "volatility",
    "prediction",
    "prediction_probability",
];

/// Check a header row against the required column set.
///
/// Extra columns are tolerated; the engine only reads what it knows.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Result<(), DataError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == **required))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing.join(", ")))
    }
}
