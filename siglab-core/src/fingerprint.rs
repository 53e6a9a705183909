//! Deterministic fingerprints for runs and datasets.
//!
//! A run is fully identified by (config, input series); hashing both lets
//! callers cache, deduplicate, and assert reproducibility without comparing
//! ledgers element by element.

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::domain::Bar;

/// BLAKE3 hash over every bar's timestamp and numeric columns, in order.
pub fn dataset_hash(bars: &[Bar]) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(&bar.timestamp.timestamp().to_le_bytes());
        for value in [
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            bar.rsi,
            bar.macd,
            bar.ema_fast,
            bar.ema_slow,
            bar.ret,
            bar.volatility,
            bar.prediction_probability,
        ] {
            hasher.update(&value.to_le_bytes());
        }
        hasher.update(&[bar.prediction]);
    }
    hasher.finalize().to_hex().to_string()
}

/// Content hash of a strategy config (via its canonical JSON form).
pub fn config_hash(config: &StrategyConfig) -> String {
    let json = serde_json::to_string(config).expect("StrategyConfig serialization cannot fail");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

/// Identity of one (config, dataset) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub config_hash: String,
    pub dataset_hash: String,
}

impl RunFingerprint {
    pub fn new(config: &StrategyConfig, bars: &[Bar]) -> Self {
        Self {
            config_hash: config_hash(config),
            dataset_hash: dataset_hash(bars),
        }
    }
}
