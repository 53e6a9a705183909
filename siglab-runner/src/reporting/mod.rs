//! Reporting and artifact export pipeline.

pub mod artifacts;
pub mod reports;

pub use artifacts::{ArtifactManager, ArtifactPaths};
pub use reports::render_summary;
