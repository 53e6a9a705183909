//! Serializable run configuration (TOML).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use siglab_core::config::StrategyConfig;

/// Unique identifier for a run (content-addressable hash of its config).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum RunConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid strategy parameters: {0}")]
    Strategy(#[from] siglab_core::ConfigError),
    #[error("no input: set either data.path or data.synthetic_bars")]
    NoInput,
}

/// Where the bar series comes from.
///
/// Exactly one of `path` (a predictions CSV) or `synthetic_bars` (length of
/// a deterministic generated series) must be set; `label` seeds the
/// synthetic generator and names the run in logs and artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: Option<PathBuf>,
    pub synthetic_bars: Option<usize>,
    pub label: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            synthetic_bars: None,
            label: "unnamed".to_string(),
        }
    }
}

/// Everything needed to reproduce one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub data: DataConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Directory where artifacts (trades.csv, equity.csv, manifest.json)
    /// are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("runs")
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, RunConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, RunConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RunConfigError> {
        if self.data.path.is_none() && self.data.synthetic_bars.is_none() {
            return Err(RunConfigError::NoInput);
        }
        self.strategy.validate()?;
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a RunId, which makes manifests
    /// comparable across machines and invocations.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization cannot fail");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [data]
        synthetic_bars = 500
        label = "BTCUSDT"
    "#;

    #[test]
    fn minimal_toml_uses_strategy_defaults() {
        let config = RunConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.data.synthetic_bars, Some(500));
        assert_eq!(config.strategy, StrategyConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("runs"));
    }

    #[test]
    fn strategy_table_overrides_defaults() {
        let config = RunConfig::from_toml(
            r#"
            [data]
            path = "predictions.csv"

            [strategy]
            hold = 12
            tp_mult = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.strategy.hold, 12);
        assert_eq!(config.strategy.tp_mult, 2.0);
        assert_eq!(
            config.strategy.sl_mult,
            StrategyConfig::default().sl_mult
        );
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = RunConfig::from_toml("[data]\nlabel = \"x\"").unwrap_err();
        assert!(matches!(err, RunConfigError::NoInput));
    }

    #[test]
    fn invalid_strategy_is_rejected() {
        let err = RunConfig::from_toml(
            r#"
            [data]
            synthetic_bars = 100

            [strategy]
            hold = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RunConfigError::Strategy(_)));
    }

    #[test]
    fn run_id_is_stable_and_config_sensitive() {
        let a = RunConfig::from_toml(MINIMAL).unwrap();
        let b = RunConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(a.run_id(), b.run_id());

        let mut c = a.clone();
        c.strategy.tp_mult += 0.1;
        assert_ne!(a.run_id(), c.run_id());
    }
}
