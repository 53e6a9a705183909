//! Property-based tests for the engine's structural invariants:
//!
//! - the account compounds multiplicatively and its peak never falls
//! - drawdown is never positive and is zero exactly at a fresh peak
//! - a trailing stop only ratchets upward
//! - every resolved exit lands inside the hold window with a coherent price
//! - ledgers from the full engine respect the compounding chain

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use siglab_core::config::StrategyConfig;
use siglab_core::data::generate_synthetic_bars;
use siglab_core::domain::{AccountState, Bar, ExitReason};
use siglab_core::engine::exit;
use siglab_core::simulate;

fn arb_pnl_fraction() -> impl Strategy<Value = f64> {
    // Realistic single-trade outcomes: between -60% and +60%.
    (-0.6..0.6_f64).prop_map(|p| (p * 1e6).round() / 1e6)
}

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_strategy_config() -> impl Strategy<Value = StrategyConfig> {
    (
        2..48_usize,
        0.5..3.0_f64,
        0.5..3.0_f64,
        0.005..0.05_f64,
        0.2..1.5_f64,
    )
        .prop_map(|(hold, tp_mult, sl_mult, trail_activation, trail_offset)| StrategyConfig {
            hold,
            tp_mult,
            sl_mult,
            trail_activation,
            trail_offset,
            min_prob: 0.5,
            min_volatility: 0.01,
            ..Default::default()
        })
}

/// A bar series where every field is derived from a close-price walk, so
/// the series always passes sanity validation.
fn series_from_walk(closes: &[f64]) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let spread = close * 0.01;
            Bar {
                timestamp: start + Duration::hours(i as i64),
                open: close,
                high: close + spread,
                low: close - spread,
                close,
                volume: 500.0,
                rsi: 50.0,
                macd: 0.1,
                ema_fast: close + 0.5,
                ema_slow: close - 0.5,
                ret: 0.0,
                volatility: spread,
                prediction: 1,
                prediction_probability: 0.6,
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn account_compounds_multiplicatively(pnls in prop::collection::vec(arb_pnl_fraction(), 1..64)) {
        let starting = 10_000.0;
        let mut account = AccountState::new(starting);
        let mut expected = starting;

        for pnl in &pnls {
            let before = account.balance();
            let absolute = account.apply(*pnl);
            expected *= 1.0 + pnl;

            prop_assert!((account.balance() - expected).abs() < 1e-6 * expected.abs().max(1.0));
            prop_assert!((absolute - before * pnl).abs() < 1e-6 * before.abs().max(1.0));
        }
    }

    #[test]
    fn peak_never_falls_and_drawdown_is_never_positive(
        pnls in prop::collection::vec(arb_pnl_fraction(), 1..64)
    ) {
        let mut account = AccountState::new(10_000.0);
        let mut previous_peak = account.peak();

        for pnl in &pnls {
            account.apply(*pnl);

            prop_assert!(account.peak() >= previous_peak);
            prop_assert!(account.peak() >= account.balance());
            prop_assert!(account.drawdown() <= 1e-12);
            if account.balance() >= account.peak() {
                prop_assert!(account.drawdown().abs() < 1e-12);
            }
            previous_peak = account.peak();
        }
    }

    #[test]
    fn trail_ratchet_is_monotone(seed in arb_price(), proposals in prop::collection::vec(arb_price(), 1..64)) {
        let mut ratchet = exit::TrailRatchet::new(seed);
        let mut last = ratchet.stop();
        prop_assert_eq!(last, seed);

        for proposal in &proposals {
            ratchet.propose(*proposal);
            prop_assert_eq!(ratchet.stop(), last.max(*proposal));
            last = ratchet.stop();
        }
    }

    #[test]
    fn resolved_exit_stays_inside_the_hold_window(
        closes in prop::collection::vec(50.0..150.0_f64, 10..120),
        config in arb_strategy_config(),
    ) {
        let bars = series_from_walk(&closes);
        prop_assume!(bars.len() > config.hold + 1);

        let entry_index = 0;
        let event = exit::resolve(&bars, entry_index, &config);

        prop_assert!(event.exit_index > entry_index);
        prop_assert!(event.exit_index <= entry_index + config.hold);
        prop_assert!(event.exit_price > 0.0);

        let exit_bar = &bars[event.exit_index];
        match event.reason {
            ExitReason::TakeProfit => {
                prop_assert!(exit_bar.high >= event.exit_price);
            }
            ExitReason::StopLoss | ExitReason::Trail => {
                prop_assert!(exit_bar.low <= event.exit_price);
            }
            ExitReason::Timeout => {
                prop_assert_eq!(event.exit_index, entry_index + config.hold);
                prop_assert_eq!(event.exit_price, exit_bar.close);
            }
        }
    }

    #[test]
    fn full_runs_keep_the_compounding_chain(config in arb_strategy_config(), n in 200..800_usize) {
        let bars = generate_synthetic_bars("prop", n);
        let result = simulate(&bars, &config).unwrap();

        let mut balance = config.starting_balance;
        for trade in &result.ledger {
            prop_assert!(trade.exit_time > trade.entry_time);
            prop_assert!(trade.exit_time - trade.entry_time <= Duration::hours(config.hold as i64));

            balance *= 1.0 + trade.pnl_fraction;
            prop_assert!((trade.balance_after - balance).abs() < 1e-6 * balance.abs().max(1.0));
        }
        prop_assert!(
            (result.account.balance() - balance).abs() < 1e-6 * balance.abs().max(1.0)
        );

        for point in &result.equity_curve {
            prop_assert!(point.drawdown <= 1e-12);
            prop_assert!(point.peak >= point.balance);
        }
    }
}
