//! Feature extraction: browsing artifacts in, fixed-order numeric vector out.

pub mod html;
pub mod network;
pub mod schema;
pub mod text;
pub mod url;

mod pipeline;

pub use pipeline::FeatureExtractor;
pub use schema::{FeatureSchema, BASIC_30, PHIUSIIL_54};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named features from one extractor. Merging is ordered and last writer
/// wins, so the combined map is deterministic.
pub type FeatureMap = HashMap<&'static str, f64>;

/// Fixed-order vector for classifier input. `values` is positionally
/// meaningful only together with `schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub schema: String,
    pub values: Vec<f64>,
    pub analysis_id: String,
    pub ts: i64,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Numeric encoding of a boolean feature.
pub(crate) fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
