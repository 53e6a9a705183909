//! Domain types for the trade simulator.

pub mod account;
pub mod bar;
pub mod trade;

pub use account::AccountState;
pub use bar::Bar;
pub use trade::{ExitReason, Trade};
