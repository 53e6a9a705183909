//! Summary aggregation over a trade ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ExitReason;
use crate::ledger::Ledger;

/// Read-only performance summary derived from one run's ledger.
///
/// An empty ledger is a well-defined result: counts and returns are zero,
/// rate/average metrics are NaN rather than a division panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub trade_count: usize,
    /// Fraction of trades with positive pnl. NaN when there are no trades.
    pub win_rate: f64,
    /// `final_balance / starting_balance - 1`.
    pub cumulative_return: f64,
    pub final_balance: f64,
    /// Most negative drawdown over the trade sequence. Always <= 0.
    pub max_drawdown: f64,
    /// Relative frequency per exit reason; reasons that never occurred are
    /// omitted.
    pub exit_reasons: BTreeMap<String, f64>,
    /// Mean of `exit_time - entry_time` in hours. NaN when there are no
    /// trades.
    pub avg_duration_hours: f64,
}

impl Summary {
    pub fn from_ledger(ledger: &Ledger, starting_balance: f64) -> Self {
        let trade_count = ledger.len();
        let final_balance = ledger
            .trades()
            .last()
            .map_or(starting_balance, |t| t.balance_after);
        let cumulative_return = final_balance / starting_balance - 1.0;

        if trade_count == 0 {
            return Self {
                trade_count: 0,
                win_rate: f64::NAN,
                cumulative_return,
                final_balance,
                max_drawdown: 0.0,
                exit_reasons: BTreeMap::new(),
                avg_duration_hours: f64::NAN,
            };
        }

        let wins = ledger.iter().filter(|t| t.is_winner()).count();
        let win_rate = wins as f64 / trade_count as f64;

        let mut peak = starting_balance;
        let mut max_drawdown = 0.0_f64;
        for trade in ledger {
            if trade.balance_after > peak {
                peak = trade.balance_after;
            }
            let drawdown = (trade.balance_after - peak) / peak;
            if drawdown < max_drawdown {
                max_drawdown = drawdown;
            }
        }

        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for trade in ledger {
            *counts.entry(trade.exit_reason.as_str()).or_default() += 1;
        }
        let exit_reasons = counts
            .into_iter()
            .map(|(reason, count)| (reason.to_string(), count as f64 / trade_count as f64))
            .collect();

        let avg_duration_hours =
            ledger.iter().map(|t| t.duration_hours()).sum::<f64>() / trade_count as f64;

        Self {
            trade_count,
            win_rate,
            cumulative_return,
            final_balance,
            max_drawdown,
            exit_reasons,
            avg_duration_hours,
        }
    }

    /// Share of trades that exited for `reason` (0 if it never occurred).
    pub fn reason_share(&self, reason: ExitReason) -> f64 {
        self.exit_reasons.get(reason.as_str()).copied().unwrap_or(0.0)
    }
}
