//! Account state: compounding balance with peak and drawdown tracking.

use serde::{Deserialize, Serialize};

/// Running account state, mutated exactly once per closed trade.
///
/// Invariants:
/// - `balance_k = balance_{k-1} * (1 + pnl_fraction_k)`
/// - `peak` is the running maximum of `balance` (never decreases)
/// - `drawdown() <= 0`, and `== 0` exactly when balance sits at its peak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    balance: f64,
    peak: f64,
}

impl AccountState {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            balance: starting_balance,
            peak: starting_balance,
        }
    }

    /// Compound one closed trade into the account.
    ///
    /// Returns the absolute pnl realized on this trade
    /// (`balance_before * pnl_fraction`).
    pub fn apply(&mut self, pnl_fraction: f64) -> f64 {
        let pnl_absolute = self.balance * pnl_fraction;
        self.balance += pnl_absolute;
        if self.balance > self.peak {
            self.peak = self.balance;
        }
        pnl_absolute
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Proportional decline from the historical peak. Always <= 0.
    pub fn drawdown(&self) -> f64 {
        (self.balance - self.peak) / self.peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_compounds_balance() {
        let mut account = AccountState::new(10_000.0);
        let pnl = account.apply(0.05);
        assert!((pnl - 500.0).abs() < 1e-9);
        assert!((account.balance() - 10_500.0).abs() < 1e-9);

        let pnl = account.apply(-0.10);
        assert!((pnl + 1_050.0).abs() < 1e-9);
        assert!((account.balance() - 9_450.0).abs() < 1e-9);
    }

    #[test]
    fn peak_is_monotone() {
        let mut account = AccountState::new(10_000.0);
        account.apply(0.10);
        assert_eq!(account.peak(), 11_000.0);
        account.apply(-0.20);
        assert_eq!(account.peak(), 11_000.0);
        account.apply(0.50);
        assert!(account.peak() > 11_000.0);
    }

    #[test]
    fn drawdown_zero_at_peak_negative_below() {
        let mut account = AccountState::new(10_000.0);
        assert_eq!(account.drawdown(), 0.0);
        account.apply(0.10);
        assert_eq!(account.drawdown(), 0.0);
        account.apply(-0.10);
        assert!(account.drawdown() < 0.0);
        assert!((account.drawdown() + 0.10).abs() < 1e-12);
    }
}
