//! siglab CLI — run, sweep, and validate commands.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config and save artifacts
//! - `sweep` — evaluate a tp/sl/hold grid over one input series
//! - `validate` — check a predictions CSV against the input contract

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use siglab_core::data::{load_bars, validate_series};
use siglab_runner::{
    load_input, run_backtest, ArtifactManager, ParamGrid, ParamSweep, RunConfig,
};

#[derive(Parser)]
#[command(name = "siglab", about = "siglab — risk-managed signal backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file.
    Run {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Override the config's output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Evaluate a take-profit / stop-loss / hold grid over one series.
    Sweep {
        /// Path to a TOML run config; its strategy table is the sweep base.
        #[arg(long)]
        config: PathBuf,

        /// Take-profit multipliers to test.
        #[arg(long, value_delimiter = ',', default_values_t = vec![1.0, 1.5, 2.0, 2.5, 3.0])]
        tp: Vec<f64>,

        /// Stop-loss multipliers to test.
        #[arg(long, value_delimiter = ',', default_values_t = vec![1.0, 1.5, 2.0, 2.5, 3.0])]
        sl: Vec<f64>,

        /// Hold horizons (bars) to test.
        #[arg(long, value_delimiter = ',', default_values_t = vec![12, 24, 48])]
        hold: Vec<usize>,

        /// Run cells sequentially instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Override the config's output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Check a predictions CSV against the input contract.
    Validate {
        /// Path to the predictions CSV.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, output_dir } => cmd_run(&config, output_dir),
        Commands::Sweep {
            config,
            tp,
            sl,
            hold,
            sequential,
            output_dir,
        } => cmd_sweep(&config, tp, sl, hold, sequential, output_dir),
        Commands::Validate { path } => cmd_validate(&path),
    }
}

fn cmd_run(config_path: &PathBuf, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = RunConfig::from_file(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let result = run_backtest(&config)?;
    print!("{}", siglab_runner::render_summary(&result));

    let manager = ArtifactManager::new(&config.output_dir)?;
    let paths = manager.save_run(&result)?;
    println!();
    println!(
        "Artifacts saved to: {}",
        paths.manifest.parent().unwrap_or(&config.output_dir).display()
    );
    Ok(())
}

fn cmd_sweep(
    config_path: &PathBuf,
    tp: Vec<f64>,
    sl: Vec<f64>,
    hold: Vec<usize>,
    sequential: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = RunConfig::from_file(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let grid = ParamGrid {
        tp_mults: tp,
        sl_mults: sl,
        holds: hold,
    };
    let bars = load_input(&config)?;
    let results = ParamSweep::new()
        .with_parallelism(!sequential)
        .sweep(&grid, &config.strategy, &bars)?;

    println!("Evaluated {} grid cells over {} bars.", results.len(), bars.len());
    println!();
    println!(
        "{:>6} {:>6} {:>5} {:>7} {:>9} {:>9}",
        "tp", "sl", "hold", "trades", "win%", "return%"
    );
    for cell in results.top_n(10) {
        println!(
            "{:>6.2} {:>6.2} {:>5} {:>7} {:>9} {:>9.2}",
            cell.config.tp_mult,
            cell.config.sl_mult,
            cell.config.hold,
            cell.summary.trade_count,
            if cell.summary.win_rate.is_nan() {
                "-".to_string()
            } else {
                format!("{:.1}", cell.summary.win_rate * 100.0)
            },
            cell.summary.cumulative_return * 100.0,
        );
    }

    // The grid CSV is keyed by the sweep's base config id.
    let sweep_id = format!("sweep-{}", &config.run_id()[..12]);
    let manager = ArtifactManager::new(&config.output_dir)?;
    let path = manager.save_sweep(&sweep_id, &results)?;
    println!();
    println!("Grid saved to: {}", path.display());
    Ok(())
}

fn cmd_validate(path: &PathBuf) -> Result<()> {
    let bars = load_bars(path)
        .with_context(|| format!("validation failed for {}", path.display()))?;
    validate_series(&bars)?;

    let first = bars.first().map(|b| b.timestamp);
    let last = bars.last().map(|b| b.timestamp);
    println!("OK: {} bars", bars.len());
    if let (Some(first), Some(last)) = (first, last) {
        println!("Range: {first} .. {last}");
    }
    Ok(())
}
