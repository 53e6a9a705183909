//! Artifact manager for persisting run outputs.

mod equity;
mod manifest;
mod sweep_grid;
mod trades;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::runner::BacktestResult;
use crate::sweep::SweepResults;

pub use manifest::{write_manifest, RunManifest};
pub use sweep_grid::write_sweep_csv;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    pub trades_csv: PathBuf,
    pub equity_csv: PathBuf,
    pub summary_txt: PathBuf,
}

/// Writes all artifacts for runs and sweeps under one output directory,
/// one subdirectory per run id.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    /// Save complete single-run artifacts: manifest, trade ledger, equity
    /// curve, and the rendered text summary.
    pub fn save_run(&self, result: &BacktestResult) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(&result.run_id);
        std::fs::create_dir_all(&run_dir).context("failed to create run artifact directory")?;

        let manifest_path = run_dir.join("manifest.json");
        manifest::write_manifest(&manifest_path, result)?;

        let trades_csv = run_dir.join("trades.csv");
        trades::write_trades_csv(&trades_csv, &result.trades)?;

        let equity_csv = run_dir.join("equity.csv");
        equity::write_equity_csv(&equity_csv, &result.equity_curve)?;

        let summary_txt = run_dir.join("summary.txt");
        std::fs::write(
            &summary_txt,
            crate::reporting::reports::render_summary(result),
        )
        .with_context(|| format!("failed to write summary to {}", summary_txt.display()))?;

        info!(run_id = %result.run_id, dir = %run_dir.display(), "run artifacts saved");

        Ok(ArtifactPaths {
            manifest: manifest_path,
            trades_csv,
            equity_csv,
            summary_txt,
        })
    }

    /// Save the sweep grid CSV under the sweep's own id.
    pub fn save_sweep(&self, sweep_id: &str, results: &SweepResults) -> Result<PathBuf> {
        let sweep_dir = self.output_dir.join(sweep_id);
        std::fs::create_dir_all(&sweep_dir)
            .context("failed to create sweep artifact directory")?;

        let sweep_csv = sweep_dir.join("sweep.csv");
        sweep_grid::write_sweep_csv(&sweep_csv, results)?;

        info!(sweep_id, cells = results.len(), "sweep artifacts saved");
        Ok(sweep_csv)
    }
}
