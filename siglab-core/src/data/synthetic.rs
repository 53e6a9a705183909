//! Deterministic synthetic bar series for tests, benches, and dry runs.
//!
//! Produces an hourly random walk with plausible indicator and signal
//! columns. Seeded from a label via blake3, so the same label always yields
//! the same series.

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Bar;

const VOLATILITY_WINDOW: usize = 10;

/// Generate `n` hourly bars for `label`, starting 2024-01-01 00:00 UTC.
pub fn generate_synthetic_bars(label: &str, n: usize) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(label.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut closes: Vec<f64> = Vec::with_capacity(n);
    let mut price = 100.0_f64;
    let mut ema_fast = price;
    let mut ema_slow = price;
    let alpha_fast = 2.0 / 21.0;
    let alpha_slow = 2.0 / 51.0;

    for i in 0..n {
        let hourly_return: f64 = rng.gen_range(-0.01..0.01);
        let open = price;
        let close = price * (1.0 + hourly_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.004));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.004));
        let volume = rng.gen_range(500.0..5_000.0);

        ema_fast += alpha_fast * (close - ema_fast);
        ema_slow += alpha_slow * (close - ema_slow);
        closes.push(close);
        let volatility = rolling_std(&closes, VOLATILITY_WINDOW);
        let rsi = (50.0 + hourly_return * 2_000.0).clamp(0.0, 100.0);

        let prediction = u8::from(rng.gen_bool(0.5));
        let prediction_probability = if prediction == 1 {
            rng.gen_range(0.5..1.0)
        } else {
            rng.gen_range(0.0..0.5)
        };

        bars.push(Bar {
            timestamp: start + Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume,
            rsi,
            macd: ema_fast - ema_slow,
            ema_fast,
            ema_slow,
            ret: hourly_return,
            volatility,
            prediction,
            prediction_probability,
        });

        price = close;
    }

    bars
}

/// Sample standard deviation over the trailing window, 0 while warming up.
fn rolling_std(values: &[f64], window: usize) -> f64 {
    if values.len() < window {
        return 0.0;
    }
    let slice = &values[values.len() - window..];
    let mean = slice.iter().sum::<f64>() / window as f64;
    let variance =
        slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window as f64 - 1.0);
    variance.sqrt()
}
