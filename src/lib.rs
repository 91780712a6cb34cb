//! PhishGuard Agent — phishing URL analysis from captured browsing artifacts.
//!
//! Modular structure:
//! - [`capture`] — Capture data model and spool-directory intake
//! - [`features`] — URL / network-log / HTML feature extraction and assembly
//! - [`classify`] — Classifier service client
//! - [`risk`] — Risk level from classifier output
//! - [`storage`] — Encrypted analysis store, artifact files
//! - [`logging`] — Structured JSON logging

pub mod capture;
pub mod classify;
pub mod config;
pub mod features;
pub mod logging;
pub mod risk;
pub mod storage;

pub use capture::{CaptureSpool, PageCapture, RawNetworkEvent};
pub use classify::{ClassifierClient, Verdict};
pub use config::AnalyzerConfig;
pub use features::{FeatureExtractor, FeatureSchema, FeatureVector};
pub use logging::StructuredLogger;
pub use risk::{RiskEngine, RiskLevel};
pub use storage::{AnalysisStore, ArtifactStore};
