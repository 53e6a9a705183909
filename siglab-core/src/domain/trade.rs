//! Trade — a completed round trip produced by the exit resolver and settled
//! by the account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a trade was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
    Trail,
    Timeout,
}

impl ExitReason {
    pub const ALL: [ExitReason; 4] = [
        ExitReason::TakeProfit,
        ExitReason::StopLoss,
        ExitReason::Trail,
        ExitReason::Timeout,
    ];

    /// Ledger column label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::TakeProfit => "take_profit",
            ExitReason::StopLoss => "stop_loss",
            ExitReason::Trail => "trail",
            ExitReason::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed trade. Immutable once appended to the ledger.
///
/// Entry/exit prices are raw; the `_with_fee` fields carry the
/// commission-adjusted prices the account model settled against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_price_with_fee: f64,
    pub exit_price_with_fee: f64,
    pub pnl_fraction: f64,
    pub pnl_absolute: f64,
    pub balance_after: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl_fraction > 0.0
    }

    /// Time the position was open.
    pub fn duration(&self) -> chrono::Duration {
        self.exit_time - self.entry_time
    }

    /// Duration in hours, the unit the summary report uses.
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_trade() -> Trade {
        Trade {
            entry_time: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            exit_time: Utc.with_ymd_and_hms(2024, 1, 2, 5, 0, 0).unwrap(),
            entry_price: 100.0,
            exit_price: 103.0,
            entry_price_with_fee: 100.05,
            exit_price_with_fee: 102.948_5,
            pnl_fraction: 0.028_970,
            pnl_absolute: 289.70,
            balance_after: 10_289.70,
            exit_reason: ExitReason::TakeProfit,
        }
    }

    #[test]
    fn winner_classification() {
        assert!(sample_trade().is_winner());
        let mut loser = sample_trade();
        loser.pnl_fraction = -0.01;
        assert!(!loser.is_winner());
    }

    #[test]
    fn duration_in_hours() {
        assert_eq!(sample_trade().duration_hours(), 5.0);
    }

    #[test]
    fn exit_reason_labels() {
        assert_eq!(ExitReason::TakeProfit.as_str(), "take_profit");
        assert_eq!(ExitReason::Trail.to_string(), "trail");
    }

    #[test]
    fn exit_reason_serializes_snake_case() {
        let json = serde_json::to_string(&ExitReason::StopLoss).unwrap();
        assert_eq!(json, "\"stop_loss\"");
    }
}
