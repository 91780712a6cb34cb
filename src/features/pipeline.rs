//! Feature vector assembly: run every extractor, merge the maps, project
//! onto the target schema's key order.

use super::{html, network, url, FeatureMap, FeatureSchema, FeatureVector};
use crate::capture::PageCapture;
use chrono::Utc;
use serde_json::Value;

/// Stateless assembler for one target schema. Extraction is a pure function
/// of its inputs, so a single extractor is safe to share across threads.
pub struct FeatureExtractor {
    schema: &'static FeatureSchema,
}

impl FeatureExtractor {
    pub fn new(schema: &'static FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        FeatureSchema::by_name(name).map(Self::new)
    }

    pub fn schema(&self) -> &'static FeatureSchema {
        self.schema
    }

    /// Extract a schema-ordered vector from one capture.
    pub fn extract(&self, capture: &PageCapture) -> FeatureVector {
        FeatureVector {
            schema: self.schema.name.to_string(),
            values: self.extract_values(&capture.url, &capture.html, &capture.network_logs),
            analysis_id: capture.analysis_id.clone(),
            ts: Utc::now().timestamp_millis(),
        }
    }

    /// Merge the three extractors' maps (URL, then network, then HTML; last
    /// writer wins) and look each schema key up in order. Keys absent from
    /// the merged map read as 0.0 — the schema alone decides the shape.
    pub fn extract_values(&self, url: &str, html: &str, network_logs: &[Value]) -> Vec<f64> {
        let mut merged = FeatureMap::new();
        merged.extend(url::basic_features(url));
        merged.extend(url::phiusiil_features(url));
        merged.extend(network::aggregate(network_logs));
        merged.extend(network::phiusiil_aggregate(network_logs));
        merged.extend(html::features(html));

        self.schema
            .keys
            .iter()
            .map(|key| merged.get(key).copied().unwrap_or(0.0))
            .collect()
    }
}
