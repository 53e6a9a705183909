//! siglab-runner — backtest orchestration on top of `siglab-core`.
//!
//! This crate provides:
//! - TOML run configuration with content-addressed run ids
//! - The single-backtest runner (input resolution, simulation, summary)
//! - Parallel parameter sweeps over the tp/sl/hold grid
//! - Artifact export: trade ledger CSV, equity CSV, sweep grid CSV, run
//!   manifest JSON, and the rendered text summary

pub mod config;
pub mod reporting;
pub mod runner;
pub mod sweep;

pub use config::{DataConfig, RunConfig, RunConfigError, RunId};
pub use reporting::{render_summary, ArtifactManager, ArtifactPaths};
pub use runner::{load_input, run_backtest, run_backtest_on_bars, BacktestResult, RunError};
pub use sweep::{ParamGrid, ParamSweep, SweepCell, SweepResults};
