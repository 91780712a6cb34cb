//! Classifier client: ship a feature vector to the ML service, get a
//! verdict back. The service owns the model; this side never interprets it.

use crate::config::ClassifierConfig;
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Phishing,
    Legitimate,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "phishing",
            Label::Legitimate => "legitimate",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub legitimate: f64,
    pub phishing: f64,
}

/// Response shape of the ML service's `/predict` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub prediction: Label,
    pub malicious: bool,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a [f64],
    schema: &'a str,
}

pub struct ClassifierClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ClassifierClient {
    /// Build a client from config. Returns `None` when the classifier is
    /// disabled or no endpoint is set — the pipeline then runs
    /// extraction-only.
    pub fn new(config: &ClassifierConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let endpoint = config.endpoint.as_ref()?.trim_end_matches('/');
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .ok()?;
        Some(Self {
            client,
            base_url: endpoint.to_string(),
        })
    }

    /// POST the vector to `/predict`. Transport and decode failures come
    /// back as `Err` for the caller to log; they never abort an analysis.
    pub fn predict(&self, features: &FeatureVector) -> Result<Verdict, String> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest {
            features: features.as_slice(),
            schema: &features.schema,
        };
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| e.to_string())?;
        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().unwrap_or_default();
            return Err(format!("{} {}", status, text));
        }
        res.json::<Verdict>().map_err(|e| e.to_string())
    }
}
