//! Bar — one OHLCV interval with attached indicators and model signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price bar enriched by the upstream feature/inference pipeline.
///
/// The engine only reads bars; indicator and signal columns are produced
/// upstream and arrive already computed. `volatility` is the rolling close
/// standard deviation frozen into the bar, and `prediction` /
/// `prediction_probability` are the classifier's directional call and its
/// confidence for this bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub rsi: f64,
    pub macd: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    #[serde(rename = "return")]
    pub ret: f64,
    pub volatility: f64,
    pub prediction: u8,
    pub prediction_probability: f64,
}

impl Bar {
    /// Basic OHLC sanity: low <= open/close <= high, strictly positive prices.
    pub fn is_sane(&self) -> bool {
        self.low <= self.open
            && self.low <= self.close
            && self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low > 0.0
            && self.volume >= 0.0
    }

    /// Signal columns within their documented domains.
    pub fn signal_in_range(&self) -> bool {
        self.prediction <= 1
            && (0.0..=1.0).contains(&self.prediction_probability)
            && (0.0..=100.0).contains(&self.rsi)
            && self.volatility >= 0.0
    }
}
