//! Equity trajectory export (CSV).

use std::path::Path;

use anyhow::{Context, Result};

use siglab_core::engine::EquityPoint;

/// Write the per-trade equity curve: exit time, balance, peak, drawdown.
pub fn write_equity_csv(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    for point in equity {
        writer
            .serialize(point)
            .context("failed to serialize equity point")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write equity CSV {}", path.display()))?;
    Ok(())
}
