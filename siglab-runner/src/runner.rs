//! Single-backtest orchestration.
//!
//! Two entry points:
//! - `run_backtest()`: resolves the input series from a `RunConfig` (CSV or
//!   synthetic), then runs. Used by the CLI.
//! - `run_backtest_on_bars()`: takes a pre-loaded series — no I/O. Used by
//!   the parameter sweep to share one series across workers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use siglab_core::config::StrategyConfig;
use siglab_core::data::{generate_synthetic_bars, load_bars, DataError};
use siglab_core::domain::{Bar, Trade};
use siglab_core::engine::EquityPoint;
use siglab_core::fingerprint::dataset_hash;
use siglab_core::{simulate, EngineError, Summary};

use crate::config::{RunConfig, RunConfigError, RunId};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] RunConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Complete, serializable result of one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub run_id: RunId,
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub config: StrategyConfig,
    pub dataset_hash: String,
    pub bar_count: usize,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub summary: Summary,
}

/// Resolve the input series named by `config.data`.
pub fn load_input(config: &RunConfig) -> Result<Vec<Bar>, RunError> {
    config.validate()?;
    let bars = match (&config.data.path, config.data.synthetic_bars) {
        (Some(path), _) => load_bars(path)?,
        (None, Some(n)) => generate_synthetic_bars(&config.data.label, n),
        (None, None) => return Err(RunConfigError::NoInput.into()),
    };
    info!(
        label = %config.data.label,
        bars = bars.len(),
        "input series loaded"
    );
    Ok(bars)
}

/// Run one backtest end to end: resolve input, simulate, summarize.
pub fn run_backtest(config: &RunConfig) -> Result<BacktestResult, RunError> {
    let bars = load_input(config)?;
    run_backtest_on_bars(config, &bars)
}

/// Run one backtest over a pre-loaded series.
pub fn run_backtest_on_bars(
    config: &RunConfig,
    bars: &[Bar],
) -> Result<BacktestResult, RunError> {
    let result = simulate(bars, &config.strategy)?;
    let summary = Summary::from_ledger(&result.ledger, config.strategy.starting_balance);

    info!(
        run_id = %config.run_id(),
        trades = summary.trade_count,
        final_balance = summary.final_balance,
        "backtest complete"
    );

    Ok(BacktestResult {
        run_id: config.run_id(),
        timestamp: Utc::now(),
        label: config.data.label.clone(),
        config: config.strategy.clone(),
        dataset_hash: dataset_hash(bars),
        bar_count: bars.len(),
        trades: result.ledger.trades().to_vec(),
        equity_curve: result.equity_curve,
        summary,
    })
}
