//! Input data: CSV ingest, schema validation, synthetic series.

pub mod loader;
pub mod schema;
pub mod synthetic;

pub use loader::{load_bars, read_bars, validate_series, DataError};
pub use schema::REQUIRED_COLUMNS;
pub use synthetic::generate_synthetic_bars;
