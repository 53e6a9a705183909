//! Trade ledger: the engine's externally visible artifact.

use serde::{Deserialize, Serialize};

use crate::domain::Trade;

/// Append-only collection of closed trades, ordered by entry time.
///
/// The engine appends trades in the order their entries were taken; nothing
/// is ever removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    trades: Vec<Trade>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed trade. Entry times must be non-decreasing.
    pub fn push(&mut self, trade: Trade) {
        debug_assert!(
            self.trades
                .last()
                .map_or(true, |last| trade.entry_time >= last.entry_time),
            "ledger must stay ordered by entry time"
        );
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trade> {
        self.trades.iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}
