//! The backtest engine: a deterministic fold over an ordered bar series.
//!
//! Control flow per run: validate config and series, walk the bars, apply
//! the entry filter, resolve each accepted entry's exit, settle it against
//! the account, and append the closed trade to the ledger. The input series
//! is never mutated; two runs on identical inputs produce identical ledgers.

pub mod accounting;
pub mod entry;
pub mod exit;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use exit::{ExitEvent, TrailRatchet};

use crate::config::{ConfigError, StrategyConfig};
use crate::data::loader::{validate_series, DataError};
use crate::domain::{AccountState, Bar};
use crate::ledger::Ledger;

/// Fatal pre-simulation failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid strategy config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid input series: {0}")]
    Data(#[from] DataError),
}

/// One point of the equity/drawdown trajectory, recorded per closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub time: DateTime<Utc>,
    pub balance: f64,
    pub peak: f64,
    pub drawdown: f64,
}

/// Everything one simulation run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ledger: Ledger,
    pub account: AccountState,
    pub equity_curve: Vec<EquityPoint>,
}

/// Run one backtest over `bars` with `config`.
///
/// Pure with respect to its inputs: no hidden state, safe to call from
/// parallel sweep workers against a shared, read-only series.
pub fn simulate(bars: &[Bar], config: &StrategyConfig) -> Result<SimulationResult, EngineError> {
    config.validate()?;
    validate_series(bars)?;

    let mut account = AccountState::new(config.starting_balance);
    let mut ledger = Ledger::new();
    let mut equity_curve = Vec::new();

    // Candidates need a full hold window ahead of them; bars closer to the
    // series end are silently skipped.
    if bars.len() <= config.hold {
        return Ok(SimulationResult {
            ledger,
            account,
            equity_curve,
        });
    }
    let last_entry = bars.len() - 1 - config.hold;

    // First index allowed to enter when overlapping trades are disabled.
    let mut next_allowed_entry = 0usize;

    for index in 0..=last_entry {
        if !config.allow_overlapping_trades && index < next_allowed_entry {
            continue;
        }
        let bar = &bars[index];
        if !entry::qualifies(bar, config) {
            continue;
        }

        let event = exit::resolve(bars, index, config);
        let trade = accounting::settle(bar, &bars[event.exit_index], &event, config, &mut account);
        equity_curve.push(EquityPoint {
            time: trade.exit_time,
            balance: account.balance(),
            peak: account.peak(),
            drawdown: account.drawdown(),
        });
        ledger.push(trade);
        next_allowed_entry = event.exit_index + 1;
    }

    Ok(SimulationResult {
        ledger,
        account,
        equity_curve,
    })
}
