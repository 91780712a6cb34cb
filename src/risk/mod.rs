//! Risk scoring over classifier output.

mod engine;

pub use engine::{AnalysisResult, RiskEngine, RiskLevel};
