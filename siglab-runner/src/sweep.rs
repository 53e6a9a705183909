//! Parameter sweep over take-profit, stop-loss, and hold-horizon grids.
//!
//! The sweep shares one read-only bar series across all workers; each cell
//! is an independent `simulate` call, so rayon can map the grid without
//! coordination.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use siglab_core::config::StrategyConfig;
use siglab_core::domain::Bar;
use siglab_core::{simulate, Summary};

use crate::runner::RunError;

/// Grid of strategy variants to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamGrid {
    pub tp_mults: Vec<f64>,
    pub sl_mults: Vec<f64>,
    pub holds: Vec<usize>,
}

impl Default for ParamGrid {
    /// The grid the heatmap report is usually rendered from.
    fn default() -> Self {
        Self {
            tp_mults: vec![1.0, 1.5, 2.0, 2.5, 3.0],
            sl_mults: vec![1.0, 1.5, 2.0, 2.5, 3.0],
            holds: vec![12, 24, 48],
        }
    }
}

impl ParamGrid {
    pub fn size(&self) -> usize {
        self.tp_mults.len() * self.sl_mults.len() * self.holds.len()
    }

    /// All strategy variants in the grid, derived from `base`.
    pub fn generate_configs(&self, base: &StrategyConfig) -> Vec<StrategyConfig> {
        let mut configs = Vec::with_capacity(self.size());
        for &tp_mult in &self.tp_mults {
            for &sl_mult in &self.sl_mults {
                for &hold in &self.holds {
                    configs.push(StrategyConfig {
                        tp_mult,
                        sl_mult,
                        hold,
                        ..base.clone()
                    });
                }
            }
        }
        configs
    }
}

/// One evaluated grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepCell {
    pub config: StrategyConfig,
    pub summary: Summary,
}

/// Parameter sweep executor.
pub struct ParamSweep {
    parallel: bool,
}

impl Default for ParamSweep {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl ParamSweep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Evaluate every cell of `grid` over `bars`.
    ///
    /// Any invalid variant aborts the sweep; grids are supposed to be
    /// well-formed before work is spent on them.
    pub fn sweep(
        &self,
        grid: &ParamGrid,
        base: &StrategyConfig,
        bars: &[Bar],
    ) -> Result<SweepResults, RunError> {
        let configs = grid.generate_configs(base);
        info!(cells = configs.len(), bars = bars.len(), "sweep started");

        let evaluate = |config: &StrategyConfig| -> Result<SweepCell, RunError> {
            let result = simulate(bars, config)?;
            Ok(SweepCell {
                summary: Summary::from_ledger(&result.ledger, config.starting_balance),
                config: config.clone(),
            })
        };

        let cells: Vec<SweepCell> = if self.parallel {
            configs
                .par_iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            configs
                .iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(SweepResults::new(cells))
    }
}

/// All evaluated cells of one sweep, in grid order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResults {
    cells: Vec<SweepCell>,
}

impl SweepResults {
    fn new(cells: Vec<SweepCell>) -> Self {
        Self { cells }
    }

    pub fn all(&self) -> &[SweepCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells ordered by cumulative return, best first. Cells with no trades
    /// (NaN win rate, zero return) sort by their zero return like any other.
    pub fn sorted_by_return(&self) -> Vec<&SweepCell> {
        let mut sorted: Vec<_> = self.cells.iter().collect();
        sorted.sort_by(|a, b| {
            b.summary
                .cumulative_return
                .partial_cmp(&a.summary.cumulative_return)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    pub fn top_n(&self, n: usize) -> Vec<&SweepCell> {
        self.sorted_by_return().into_iter().take(n).collect()
    }

    pub fn best(&self) -> Option<&SweepCell> {
        self.sorted_by_return().into_iter().next()
    }
}
