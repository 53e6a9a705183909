//! Exit resolver: per-trade forward scan over the hold window.
//!
//! Each candidate entry runs a small state machine: the trade starts in
//! `Watching`, may transition to `Active` once price moves far enough in its
//! favor, and closes on the first matching exit condition under the
//! configured priority ordering. TP and SL levels are frozen at entry from
//! the entry bar's volatility; the trailing stop ratchets upward and never
//! retreats.

use crate::config::{ExitPriority, StrategyConfig};
use crate::domain::{Bar, ExitReason};

/// The single exit event produced for one candidate entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitEvent {
    /// Index of the bar the trade closed on.
    pub exit_index: usize,
    /// Raw exit price; commission is applied by the account model.
    pub exit_price: f64,
    pub reason: ExitReason,
}

/// Monotone trailing stop for a long position: proposals may raise the stop,
/// never lower it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailRatchet {
    stop: f64,
}

impl TrailRatchet {
    pub fn new(initial_stop: f64) -> Self {
        Self { stop: initial_stop }
    }

    /// Apply a proposed stop level; returns the (possibly unchanged) stop.
    pub fn propose(&mut self, candidate: f64) -> f64 {
        if candidate > self.stop {
            self.stop = candidate;
        }
        self.stop
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }
}

/// Trade lifecycle within the hold window.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TrailPhase {
    /// Waiting for the activation move; no trailing stop exists yet.
    Watching,
    /// Trailing stop armed and ratcheting.
    Active(TrailRatchet),
}

/// Fixed price levels computed once at entry.
#[derive(Debug, Clone, Copy)]
struct EntryLevels {
    entry_price: f64,
    volatility: f64,
    take_profit: f64,
    stop_loss: f64,
}

/// Resolve the exit for a trade entered at `entry_index`.
///
/// Scans forward up to `hold` bars and returns the first applicable exit
/// under the configured priority; if nothing triggers, the trade times out
/// at the close of bar `entry_index + hold`.
///
/// Caller guarantees `entry_index + hold < bars.len()`; candidates closer to
/// the series end are filtered out before entry.
pub fn resolve(bars: &[Bar], entry_index: usize, config: &StrategyConfig) -> ExitEvent {
    debug_assert!(entry_index + config.hold < bars.len());

    let entry = &bars[entry_index];
    let levels = EntryLevels {
        entry_price: entry.close,
        // Frozen at entry; never recomputed during the hold window.
        volatility: entry.volatility,
        take_profit: entry.close + entry.volatility * config.tp_mult,
        stop_loss: entry.close - entry.volatility * config.sl_mult,
    };

    let mut phase = TrailPhase::Watching;

    for j in 1..=config.hold {
        let index = entry_index + j;
        let bar = &bars[index];
        let hit = match config.exit_priority {
            ExitPriority::TrailFirst => step_trail_first(bar, &levels, config, &mut phase),
            ExitPriority::TpSlFirst => step_tp_sl_first(bar, &levels, config, &mut phase),
        };
        if let Some((exit_price, reason)) = hit {
            return ExitEvent {
                exit_index: index,
                exit_price,
                reason,
            };
        }
    }

    let last = entry_index + config.hold;
    ExitEvent {
        exit_index: last,
        exit_price: bars[last].close,
        reason: ExitReason::Timeout,
    }
}

/// Canonical ordering: trailing activation and breach before TP, TP before SL.
fn step_trail_first(
    bar: &Bar,
    levels: &EntryLevels,
    config: &StrategyConfig,
    phase: &mut TrailPhase,
) -> Option<(f64, ExitReason)> {
    maybe_activate(bar, levels, config, phase);
    if let Some(hit) = check_trail(bar, levels, config, phase) {
        return Some(hit);
    }
    if bar.high >= levels.take_profit {
        return Some((levels.take_profit, ExitReason::TakeProfit));
    }
    if bar.low <= levels.stop_loss {
        return Some((levels.stop_loss, ExitReason::StopLoss));
    }
    None
}

/// Alternate ordering: TP and SL resolve before any trailing logic runs.
fn step_tp_sl_first(
    bar: &Bar,
    levels: &EntryLevels,
    config: &StrategyConfig,
    phase: &mut TrailPhase,
) -> Option<(f64, ExitReason)> {
    if bar.high >= levels.take_profit {
        return Some((levels.take_profit, ExitReason::TakeProfit));
    }
    if bar.low <= levels.stop_loss {
        return Some((levels.stop_loss, ExitReason::StopLoss));
    }
    maybe_activate(bar, levels, config, phase);
    check_trail(bar, levels, config, phase)
}

/// Arm the trailing stop once the bar's high has moved far enough in the
/// position's favor.
fn maybe_activate(bar: &Bar, levels: &EntryLevels, config: &StrategyConfig, phase: &mut TrailPhase) {
    if let TrailPhase::Watching = phase {
        let favorable_move = (bar.high - levels.entry_price) / levels.entry_price;
        if favorable_move >= config.trail_activation {
            let seed = bar.close - levels.volatility * config.trail_offset;
            *phase = TrailPhase::Active(TrailRatchet::new(seed));
        }
    }
}

/// Ratchet the stop from the current close, then test for a breach.
fn check_trail(
    bar: &Bar,
    levels: &EntryLevels,
    config: &StrategyConfig,
    phase: &mut TrailPhase,
) -> Option<(f64, ExitReason)> {
    if let TrailPhase::Active(ratchet) = phase {
        let stop = ratchet.propose(bar.close - levels.volatility * config.trail_offset);
        if bar.low <= stop {
            return Some((stop, ExitReason::Trail));
        }
    }
    None
}
