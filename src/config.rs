//! Agent configuration. Loaded once at startup into an immutable object;
//! nothing in the pipeline reads ambient global state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Data directory (analysis store, artifact files)
    pub data_dir: PathBuf,
    /// Capture intake from the browsing collaborator
    pub spool: SpoolConfig,
    /// Feature extraction parameters
    pub features: FeaturesConfig,
    /// External classifier service
    pub classifier: ClassifierConfig,
    /// Risk thresholds over the phishing probability
    pub risk: RiskConfig,
    /// Artifact retention
    pub artifacts: ArtifactsConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoolConfig {
    /// Directory the browser side drops capture JSON files into
    pub dir: PathBuf,
    /// Poll interval (seconds); 0 runs a single cycle and exits
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Schema the classifier was trained on: "basic-30" or "phiusiil-54".
    /// Must match the serving side byte for byte.
    pub schema: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// When false the agent extracts and stores vectors without verdicts
    pub enabled: bool,
    /// Base URL of the ML service (its `/predict` route is used)
    pub endpoint: Option<String>,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Phishing probability at or above this is high risk (0.0-1.0)
    pub high_threshold: f64,
    /// Phishing probability at or above this is medium risk
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Keep the HTML snapshot and raw log on disk after analysis
    pub keep: bool,
    /// Delete artifacts older than this many days (0 disables pruning)
    pub retention_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".phishguard")
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            spool: SpoolConfig::default(),
            features: FeaturesConfig::default(),
            classifier: ClassifierConfig::default(),
            risk: RiskConfig::default(),
            artifacts: ArtifactsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SpoolConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir().join("spool"),
            poll_interval_secs: 5,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            schema: "basic-30".to_string(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: 0.8,
            medium_threshold: 0.5,
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            keep: true,
            retention_days: 30,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AnalyzerConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AnalyzerConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
