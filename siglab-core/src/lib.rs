//! siglab-core — risk-managed trade simulation over ML-signal price bars.
//!
//! The heart of the backtester:
//! - Domain types (bars with indicator/signal columns, trades, account state)
//! - Entry filter (pure per-bar predicate)
//! - Exit resolver (per-trade state machine: TP / SL / trailing / timeout)
//! - Account model (symmetric commission, full-balance compounding)
//! - Append-only trade ledger and summary aggregation
//! - CSV ingest with schema validation, synthetic series, run fingerprints

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod ledger;
pub mod stats;

pub use config::{ConfigError, ExitPriority, StrategyConfig};
pub use domain::{AccountState, Bar, ExitReason, Trade};
pub use engine::{simulate, EngineError, EquityPoint, SimulationResult};
pub use ledger::Ledger;
pub use stats::Summary;
