//! Account model: commission application, PnL, and balance compounding.

use crate::config::StrategyConfig;
use crate::domain::{AccountState, Bar, Trade};
use crate::engine::exit::ExitEvent;

/// Settle one resolved exit against the account and produce the closed trade.
///
/// Commission is applied symmetrically: the entry fill is worsened by
/// `(1 + c)`, the exit fill by `(1 - c)`. The whole balance rides each
/// trade, so the account compounds by `(1 + pnl_fraction)`.
pub fn settle(
    entry_bar: &Bar,
    exit_bar: &Bar,
    exit: &ExitEvent,
    config: &StrategyConfig,
    account: &mut AccountState,
) -> Trade {
    let entry_price = entry_bar.close;
    let entry_price_with_fee = entry_price * (1.0 + config.commission);
    let exit_price_with_fee = exit.exit_price * (1.0 - config.commission);

    let pnl_fraction = (exit_price_with_fee - entry_price_with_fee) / entry_price_with_fee;
    let pnl_absolute = account.apply(pnl_fraction);

    Trade {
        entry_time: entry_bar.timestamp,
        exit_time: exit_bar.timestamp,
        entry_price,
        exit_price: exit.exit_price,
        entry_price_with_fee,
        exit_price_with_fee,
        pnl_fraction,
        pnl_absolute,
        balance_after: account.balance(),
        exit_reason: exit.reason,
    }
}
