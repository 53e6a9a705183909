//! Trade ledger export (CSV).

use std::path::Path;

use anyhow::{Context, Result};

use siglab_core::domain::Trade;

/// Write the closed-trade ledger, one row per trade in entry-time order.
pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    for trade in trades {
        writer
            .serialize(trade)
            .context("failed to serialize trade row")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write trades CSV {}", path.display()))?;
    Ok(())
}
