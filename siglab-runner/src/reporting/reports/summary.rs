//! Text summary report for a single run.

use std::fmt::Write;

use siglab_core::domain::ExitReason;

use crate::runner::BacktestResult;

/// Render the run summary the way the CLI prints it: identity block, then
/// performance, then the exit-reason distribution.
pub fn render_summary(result: &BacktestResult) -> String {
    let summary = &result.summary;
    let mut out = String::new();

    let _ = writeln!(out, "=== Backtest summary: {} ===", result.label);
    let _ = writeln!(out, "run id        : {}", result.run_id);
    let _ = writeln!(out, "dataset hash  : {}", result.dataset_hash);
    let _ = writeln!(out, "bars          : {}", result.bar_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "trades        : {}", summary.trade_count);
    let _ = writeln!(out, "win rate      : {}", percent_or_dash(summary.win_rate));
    let _ = writeln!(
        out,
        "final balance : {:.2} (from {:.2})",
        summary.final_balance, result.config.starting_balance
    );
    let _ = writeln!(
        out,
        "return        : {:+.2}%",
        summary.cumulative_return * 100.0
    );
    let _ = writeln!(
        out,
        "max drawdown  : {:.2}%",
        summary.max_drawdown * 100.0
    );
    let _ = writeln!(
        out,
        "avg duration  : {}",
        hours_or_dash(summary.avg_duration_hours)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "exit reasons:");
    for reason in ExitReason::ALL {
        let share = summary.reason_share(reason);
        if share > 0.0 {
            let _ = writeln!(out, "  {:<12} {:>6.1}%", reason.as_str(), share * 100.0);
        }
    }

    out
}

fn percent_or_dash(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.1}%", value * 100.0)
    }
}

fn hours_or_dash(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.1}h")
    }
}
