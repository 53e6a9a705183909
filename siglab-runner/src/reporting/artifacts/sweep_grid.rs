//! Sweep grid export (CSV), one row per evaluated cell.
//!
//! The downstream heatmap renderer pivots this table on
//! (tp_mult, sl_mult) per hold value.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::sweep::SweepResults;

#[derive(Debug, Serialize)]
struct SweepRow {
    tp_mult: f64,
    sl_mult: f64,
    hold: usize,
    trade_count: usize,
    win_rate: f64,
    cumulative_return: f64,
    max_drawdown: f64,
    final_balance: f64,
}

pub fn write_sweep_csv(path: &Path, results: &SweepResults) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create sweep CSV {}", path.display()))?;

    for cell in results.all() {
        writer
            .serialize(SweepRow {
                tp_mult: cell.config.tp_mult,
                sl_mult: cell.config.sl_mult,
                hold: cell.config.hold,
                trade_count: cell.summary.trade_count,
                win_rate: cell.summary.win_rate,
                cumulative_return: cell.summary.cumulative_return,
                max_drawdown: cell.summary.max_drawdown,
                final_balance: cell.summary.final_balance,
            })
            .context("failed to serialize sweep row")?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write sweep CSV {}", path.display()))?;
    Ok(())
}
