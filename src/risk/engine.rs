//! Maps the classifier's phishing probability to a risk level through
//! configurable thresholds.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64, config: &RiskConfig) -> Self {
        if score >= config.high_threshold {
            RiskLevel::High
        } else if score >= config.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Outcome of one analysis. `score` is the phishing probability, or 0.0
/// when no classifier was reachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub score: f64,
    pub level: RiskLevel,
    pub ts: i64,
}

pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, analysis_id: String, raw_score: f64, ts: i64) -> AnalysisResult {
        let level = RiskLevel::from_score(raw_score, &self.config);
        AnalysisResult {
            analysis_id,
            score: raw_score,
            level,
            ts,
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}
