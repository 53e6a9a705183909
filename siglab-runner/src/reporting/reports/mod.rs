//! Rendered (human-readable) reports.

mod summary;

pub use summary::render_summary;
