//! Entry filter: the pure per-bar predicate deciding whether to open a trade.

use crate::config::StrategyConfig;
use crate::domain::Bar;

/// Take-profit price for an entry at this bar's close.
pub fn take_profit_level(bar: &Bar, config: &StrategyConfig) -> f64 {
    bar.close + bar.volatility * config.tp_mult
}

/// Stop-loss price for an entry at this bar's close.
pub fn stop_loss_level(bar: &Bar, config: &StrategyConfig) -> f64 {
    bar.close - bar.volatility * config.sl_mult
}

/// Whether a trade should be opened at this bar.
///
/// All conditions must hold:
/// - directional long signal with sufficient confidence,
/// - RSI below the overbought level,
/// - fast EMA above slow EMA (trend filter),
/// - volatility at or above the floor,
/// - the theoretical TP move covers the round-trip commission.
///
/// Pure function of one bar plus the config; no account state is visible.
pub fn qualifies(bar: &Bar, config: &StrategyConfig) -> bool {
    if bar.prediction != 1 {
        return false;
    }
    if bar.prediction_probability < config.min_prob {
        return false;
    }
    if bar.rsi >= config.rsi_overbought {
        return false;
    }
    if bar.ema_fast <= bar.ema_slow {
        return false;
    }
    if bar.volatility < config.min_volatility {
        return false;
    }

    // Trades whose theoretical edge cannot pay the commission on both sides
    // are never worth opening.
    let expected_profit_ratio = (take_profit_level(bar, config) - bar.close) / bar.close;
    expected_profit_ratio >= 2.0 * config.commission
}
