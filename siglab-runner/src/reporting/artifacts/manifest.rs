//! Run manifest export (JSON).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use siglab_core::config::StrategyConfig;
use siglab_core::Summary;

use crate::runner::BacktestResult;

/// Everything needed to identify and reproduce a run without re-reading the
/// trade tape: content-addressed ids plus the aggregated summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub label: String,
    pub dataset_hash: String,
    pub bar_count: usize,
    pub config: StrategyConfig,
    pub summary: Summary,
}

impl RunManifest {
    pub fn from_result(result: &BacktestResult) -> Self {
        Self {
            run_id: result.run_id.clone(),
            timestamp: result.timestamp,
            label: result.label.clone(),
            dataset_hash: result.dataset_hash.clone(),
            bar_count: result.bar_count,
            config: result.config.clone(),
            summary: result.summary.clone(),
        }
    }
}

pub fn write_manifest(path: &Path, result: &BacktestResult) -> Result<()> {
    let manifest = RunManifest::from_result(result);
    let json =
        serde_json::to_string_pretty(&manifest).context("failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}
