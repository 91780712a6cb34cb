//! Captured browsing artifacts: one visited page plus its Chrome
//! performance-log events, as handed over by the browsing collaborator.
//! Shared capture types; spool intake in a submodule.

mod spool;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use spool::CaptureSpool;

/// One captured page visit. The capture file is written by the browser side;
/// everything except the URL may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    #[serde(default = "fresh_id")]
    pub analysis_id: String,
    pub url: String,
    #[serde(default)]
    pub html: String,
    /// Parsed Chrome DevTools log entries: `{"message": {"method", "params"}}`.
    #[serde(default, alias = "logs")]
    pub network_logs: Vec<Value>,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl PageCapture {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            analysis_id: fresh_id(),
            url: url.into(),
            html: String::new(),
            network_logs: Vec::new(),
        }
    }
}

/// Event kinds the network extractor distinguishes. Matching is by substring
/// on `message.method`, so `Network.responseReceived` and bare
/// `responseReceived` both classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    RequestWillBeSent,
    ResponseReceived,
    DataReceived,
    Other,
}

/// Borrow wrapper over one raw log entry. Field presence is never assumed:
/// every accessor returns an `Option` (or an empty default), and an entry
/// that is not even a JSON object is skipped whole by callers.
#[derive(Debug, Clone, Copy)]
pub struct RawNetworkEvent<'a> {
    value: &'a Value,
}

impl<'a> RawNetworkEvent<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// False for entries that are not JSON objects; those are dropped
    /// without contributing to any aggregate, cookie sightings included.
    pub fn well_formed(&self) -> bool {
        self.value.is_object()
    }

    fn message(&self) -> Option<&'a Value> {
        self.value.get("message")
    }

    pub fn method(&self) -> &'a str {
        self.message()
            .and_then(|m| m.get("method"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn kind(&self) -> EventKind {
        let method = self.method();
        if method.contains("requestWillBeSent") {
            EventKind::RequestWillBeSent
        } else if method.contains("responseReceived") {
            EventKind::ResponseReceived
        } else if method.contains("dataReceived") {
            EventKind::DataReceived
        } else {
            EventKind::Other
        }
    }

    pub fn params(&self) -> Option<&'a Value> {
        self.message().and_then(|m| m.get("params"))
    }

    /// JSON rendering of the params block, for coarse substring heuristics
    /// (cookie detection, `https://` sighting).
    pub fn params_text(&self) -> String {
        self.params().map(Value::to_string).unwrap_or_default()
    }

    pub fn request_url(&self) -> Option<&'a str> {
        self.params()
            .and_then(|p| p.get("request"))
            .and_then(|r| r.get("url"))
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
    }

    fn response(&self) -> Option<&'a Value> {
        self.params().and_then(|p| p.get("response"))
    }

    pub fn status(&self) -> Option<i64> {
        self.response()
            .and_then(|r| r.get("status"))
            .and_then(Value::as_i64)
            .filter(|s| *s > 0)
    }

    pub fn protocol(&self) -> Option<&'a str> {
        self.response()
            .and_then(|r| r.get("protocol"))
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Non-empty `securityDetails` object, when present.
    pub fn security_details(&self) -> Option<&'a Value> {
        self.response()
            .and_then(|r| r.get("securityDetails"))
            .filter(|s| s.as_object().map(|o| !o.is_empty()).unwrap_or(false))
    }

    pub fn receive_headers_end(&self) -> Option<f64> {
        self.response()
            .and_then(|r| r.get("timing"))
            .and_then(|t| t.get("receiveHeadersEnd"))
            .and_then(Value::as_f64)
    }

    /// `content-type` header, either casing, lower-cased.
    pub fn content_type(&self) -> Option<String> {
        let headers = self.response().and_then(|r| r.get("headers"))?;
        let ct = headers
            .get("content-type")
            .or_else(|| headers.get("Content-Type"))
            .and_then(Value::as_str)?;
        if ct.is_empty() {
            None
        } else {
            Some(ct.to_lowercase())
        }
    }

    pub fn encoded_data_length(&self) -> Option<f64> {
        self.response()
            .and_then(|r| r.get("encodedDataLength"))
            .and_then(Value::as_f64)
            .filter(|n| *n > 0.0)
    }

    pub fn data_length(&self) -> Option<f64> {
        self.params()
            .and_then(|p| p.get("dataLength"))
            .and_then(Value::as_f64)
            .filter(|n| *n > 0.0)
    }

    pub fn timestamp(&self) -> Option<f64> {
        self.params()
            .and_then(|p| p.get("timestamp"))
            .and_then(Value::as_f64)
    }
}
