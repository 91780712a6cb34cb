//! Aggregate traffic statistics over a heterogeneous Chrome performance log.
//! One bad entry never aborts the batch, and every ratio has a defined zero
//! default when its denominator collection is empty.

use super::url::UrlParts;
use super::{flag, FeatureMap};
use crate::capture::{EventKind, RawNetworkEvent};
use serde_json::Value;
use std::collections::HashSet;

/// Single-pass accumulator. Statuses, protocols and content types are
/// multisets (duplicates count); only the host set is deduplicated.
#[derive(Debug, Default)]
pub struct NetworkAggregates {
    request_count: usize,
    domains: HashSet<String>,
    status_codes: Vec<i64>,
    protocols: Vec<String>,
    content_types: Vec<String>,
    security_count: usize,
    tls13_seen: bool,
    response_times: Vec<f64>,
    data_sizes: Vec<f64>,
    cookie_events: usize,
}

impl NetworkAggregates {
    /// Fold one raw entry in. Entries that are not JSON objects are skipped
    /// whole; within an object, absent fields simply contribute nothing.
    pub fn observe(&mut self, event: &RawNetworkEvent<'_>) {
        if !event.well_formed() {
            return;
        }

        match event.kind() {
            EventKind::RequestWillBeSent => {
                if let Some(url) = event.request_url() {
                    self.request_count += 1;
                    let host = UrlParts::split(url).host;
                    if !host.is_empty() {
                        self.domains.insert(host);
                    }
                }
            }
            EventKind::ResponseReceived => {
                if let Some(status) = event.status() {
                    self.status_codes.push(status);
                }
                if let Some(protocol) = event.protocol() {
                    self.protocols.push(protocol.to_string());
                }
                if let Some(security) = event.security_details() {
                    self.security_count += 1;
                    let protocol = security
                        .get("protocol")
                        .and_then(Value::as_str)
                        .unwrap_or("");
                    if protocol.contains("TLS 1.3") {
                        self.tls13_seen = true;
                    }
                }
                if let Some(time) = event.receive_headers_end() {
                    if time > 0.0 {
                        self.response_times.push(time);
                    }
                }
                if let Some(ct) = event.content_type() {
                    self.content_types.push(ct);
                }
                if let Some(size) = event.encoded_data_length() {
                    self.data_sizes.push(size);
                }
            }
            EventKind::DataReceived => {
                if let Some(size) = event.data_length() {
                    self.data_sizes.push(size);
                }
            }
            EventKind::Other => {}
        }

        // Coarse heuristic by contract: any params block whose JSON rendering
        // mentions "cookie" counts, whatever the event kind.
        if event.params_text().to_lowercase().contains("cookie") {
            self.cookie_events += 1;
        }
    }

    /// The 20 network features of the basic schema. Folding zero events
    /// yields the documented all-zero map.
    pub fn finish(self) -> FeatureMap {
        let total_requests = self.request_count as f64;
        let unique_domains = self.domains.len() as f64;

        let avg_response_time = mean(&self.response_times);
        let max_response_time = self
            .response_times
            .iter()
            .copied()
            .fold(0.0f64, f64::max);

        let h2_count = self.protocols.iter().filter(|p| p.as_str() == "h2").count() as f64;
        let h3_count = self
            .protocols
            .iter()
            .filter(|p| matches!(p.as_str(), "h3" | "quic"))
            .count() as f64;

        let redirect_count = self
            .status_codes
            .iter()
            .filter(|s| (300..400).contains(*s))
            .count() as f64;
        let error_count = self.status_codes.iter().filter(|s| **s >= 400).count() as f64;
        let success_count = self
            .status_codes
            .iter()
            .filter(|s| (200..300).contains(*s))
            .count() as f64;

        let script_count = self
            .content_types
            .iter()
            .filter(|ct| ct.contains("javascript") || ct.contains("script"))
            .count() as f64;
        let image_count = self.content_types.iter().filter(|ct| ct.contains("image")).count() as f64;
        let css_count = self.content_types.iter().filter(|ct| ct.contains("css")).count() as f64;

        let total_data: f64 = self.data_sizes.iter().sum();

        let mut m = FeatureMap::new();
        m.insert("total_requests", total_requests);
        m.insert("unique_domains", unique_domains);
        m.insert(
            "external_domain_ratio",
            if unique_domains > 1.0 {
                (unique_domains - 1.0) / unique_domains
            } else {
                0.0
            },
        );
        m.insert("avg_response_time", avg_response_time);
        m.insert("max_response_time", max_response_time);
        m.insert("has_tls_13", flag(self.tls13_seen));
        m.insert(
            "secure_request_ratio",
            ratio(self.security_count as f64, total_requests),
        );
        m.insert("http2_ratio", ratio(h2_count, total_requests));
        m.insert("http3_ratio", ratio(h3_count, total_requests));
        m.insert("redirect_count", redirect_count);
        m.insert("error_count", error_count);
        m.insert(
            "success_ratio",
            ratio(success_count, self.status_codes.len() as f64),
        );
        m.insert("script_count", script_count);
        m.insert("image_count", image_count);
        m.insert("css_count", css_count);
        m.insert("script_ratio", ratio(script_count, total_requests));
        m.insert("total_data_kb", total_data / 1024.0);
        m.insert("avg_data_size_kb", mean(&self.data_sizes) / 1024.0);
        m.insert("cookie_count", self.cookie_events as f64);
        m.insert("has_cookies", flag(self.cookie_events > 0));
        m
    }
}

/// Fold a whole log into the basic 20-feature map.
pub fn aggregate(events: &[Value]) -> FeatureMap {
    let mut acc = NetworkAggregates::default();
    for value in events {
        acc.observe(&RawNetworkEvent::new(value));
    }
    acc.finish()
}

/// The 4 network features of the PhiUSIIL-compatible schema.
///
/// `qty_external_redirection` is a known gap: no cross-origin redirect
/// detection exists, so it is always 0. `time_response` is the mean of the
/// raw event timestamps over the whole log (malformed entries included in
/// the denominator), not a true response-time measurement.
pub fn phiusiil_aggregate(events: &[Value]) -> FeatureMap {
    let mut redirects = 0usize;
    let mut has_ssl = false;
    let mut total_time = 0.0f64;

    for value in events {
        let event = RawNetworkEvent::new(value);
        if !event.well_formed() {
            continue;
        }
        if event.kind() == EventKind::ResponseReceived {
            if let Some(status) = event.status() {
                if (300..400).contains(&status) {
                    redirects += 1;
                }
            }
        }
        if event.params_text().contains("https://") {
            has_ssl = true;
        }
        if let Some(ts) = event.timestamp() {
            total_time += ts;
        }
    }

    let mut m = FeatureMap::new();
    m.insert(
        "time_response",
        if events.is_empty() {
            0.0
        } else {
            total_time / events.len() as f64
        },
    );
    m.insert("qty_redirects", redirects as f64);
    m.insert("qty_external_redirection", 0.0);
    m.insert("qty_ssl", flag(has_ssl));
    m
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
