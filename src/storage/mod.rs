//! Local persistence: encrypted analysis records and captured-artifact files.

mod artifacts;
mod encrypted;

pub use artifacts::{ArtifactRecord, ArtifactStore};
pub use encrypted::{AnalysisRecord, AnalysisStore};
