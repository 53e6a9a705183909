//! Strategy configuration: every tunable knob of a single backtest run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative priority of the trailing-stop checks against TP/SL.
///
/// The two historical strategy variants disagreed on this ordering, and it
/// changes outcomes on bars where several exit conditions are met intrabar,
/// so it is an explicit policy knob rather than a hard-coded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPriority {
    /// Trailing activation/breach is evaluated before TP and SL (canonical).
    TrailFirst,
    /// TP and SL are evaluated first; trailing logic runs after both.
    TpSlFirst,
}

/// Immutable parameter set for one backtest run.
///
/// A parameter sweep runs many independent instances of this struct; nothing
/// here is mutated during simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Maximum bars a trade stays open before the forced timeout exit.
    pub hold: usize,
    /// Minimum classifier confidence to accept an entry.
    pub min_prob: f64,
    /// RSI level at or above which an entry is rejected as exhausted.
    pub rsi_overbought: f64,
    /// Minimum entry-bar volatility; rejects dead markets and the
    /// degenerate TP=SL=entry case.
    pub min_volatility: f64,
    /// Take-profit offset in volatility multiples above entry.
    pub tp_mult: f64,
    /// Stop-loss offset in volatility multiples below entry.
    pub sl_mult: f64,
    /// Fractional favorable move that arms the trailing stop.
    pub trail_activation: f64,
    /// Trailing-stop offset in volatility multiples below the close.
    pub trail_offset: f64,
    /// Proportional commission per side.
    pub commission: f64,
    /// Account balance at the start of the run.
    pub starting_balance: f64,
    /// Exit-check ordering policy.
    pub exit_priority: ExitPriority,
    /// Whether a new entry may open while a prior hold window is still
    /// running. `true` matches the original engines.
    pub allow_overlapping_trades: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            hold: 24,
            min_prob: 0.52,
            rsi_overbought: 70.0,
            min_volatility: 0.0007,
            tp_mult: 1.5,
            sl_mult: 2.0,
            trail_activation: 0.012,
            trail_offset: 0.8,
            commission: 0.0005,
            starting_balance: 10_000.0,
            exit_priority: ExitPriority::TrailFirst,
            allow_overlapping_trades: true,
        }
    }
}

/// Rejected strategy parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("hold horizon must be at least 1 bar")]
    ZeroHold,
    #[error("min_volatility must be positive (got {0})")]
    NonPositiveVolatilityFloor(f64),
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must lie in [0, 1] (got {value})")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("commission must lie in [0, 0.5) (got {0})")]
    BadCommission(f64),
}

impl StrategyConfig {
    /// Validate the parameter set before a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold == 0 {
            return Err(ConfigError::ZeroHold);
        }
        if self.min_volatility <= 0.0 {
            return Err(ConfigError::NonPositiveVolatilityFloor(self.min_volatility));
        }
        for (name, value) in [
            ("tp_mult", self.tp_mult),
            ("sl_mult", self.sl_mult),
            ("trail_offset", self.trail_offset),
            ("trail_activation", self.trail_activation),
            ("starting_balance", self.starting_balance),
            ("rsi_overbought", self.rsi_overbought),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.min_prob) {
            return Err(ConfigError::OutOfUnitRange {
                name: "min_prob",
                value: self.min_prob,
            });
        }
        if !(0.0..0.5).contains(&self.commission) {
            return Err(ConfigError::BadCommission(self.commission));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(StrategyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_hold_rejected() {
        let config = StrategyConfig {
            hold: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroHold));
    }

    #[test]
    fn zero_volatility_floor_rejected() {
        let config = StrategyConfig {
            min_volatility: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveVolatilityFloor(_))
        ));
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let config = StrategyConfig {
            min_prob: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { name: "min_prob", .. })
        ));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: StrategyConfig = toml::from_str(
            r#"
            hold = 3
            tp_mult = 2.5
            exit_priority = "tp_sl_first"
            "#,
        )
        .unwrap();
        assert_eq!(config.hold, 3);
        assert_eq!(config.tp_mult, 2.5);
        assert_eq!(config.exit_priority, ExitPriority::TpSlFirst);
        // untouched knobs keep their defaults
        assert_eq!(config.commission, 0.0005);
        assert!(config.allow_overlapping_trades);
    }
}
