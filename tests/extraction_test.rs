//! Feature extraction properties: vector shape, zero defaults, entropy,
//! URL lexing, network aggregation, schema projection.

use phishguard_agent::features::{network, text, url, FeatureExtractor, BASIC_30, PHIUSIIL_54};
use phishguard_agent::features::{FeatureSchema, FeatureVector};
use serde_json::{json, Value};

fn request_event(url: &str) -> Value {
    json!({
        "message": {
            "method": "Network.requestWillBeSent",
            "params": {"request": {"url": url}}
        }
    })
}

fn response_event(status: i64) -> Value {
    json!({
        "message": {
            "method": "Network.responseReceived",
            "params": {"response": {"status": status}}
        }
    })
}

#[test]
fn vector_length_matches_schema() {
    let logs = vec![request_event("https://example.com/")];
    for schema in [&BASIC_30, &PHIUSIIL_54] {
        let extractor = FeatureExtractor::new(schema);
        let values = extractor.extract_values("https://example.com/login", "<html></html>", &logs);
        assert_eq!(values.len(), schema.len(), "{}", schema.name);
    }
}

#[test]
fn empty_inputs_yield_zero_vector() {
    let direct = network::aggregate(&[]);
    for (key, value) in &direct {
        assert_eq!(*value, 0.0, "{}", key);
    }

    let extractor = FeatureExtractor::new(&BASIC_30);
    let values = extractor.extract_values("", "", &[]);
    assert_eq!(values, vec![0.0; 30]);

    // The pipeline's network positions must mirror the direct fold exactly.
    for (i, key) in BASIC_30.keys.iter().enumerate().skip(10) {
        assert_eq!(values[i], direct[*key], "{}", key);
    }
}

#[test]
fn entropy_edge_cases() {
    assert_eq!(text::shannon_entropy(""), 0.0);
    assert_eq!(text::shannon_entropy("aaaa"), 0.0);
    assert_eq!(text::shannon_entropy("ab"), 1.0);
}

#[test]
fn ip_host_is_pattern_only() {
    assert_eq!(url::basic_features("http://192.168.1.1/")["has_ip"], 1.0);
    assert_eq!(url::basic_features("http://example.com/")["has_ip"], 0.0);
    // No range validation: a non-routable dotted quad still matches.
    assert_eq!(url::basic_features("http://999.999.999.999/")["has_ip"], 1.0);
}

#[test]
fn subdomain_counting() {
    assert_eq!(
        url::basic_features("http://a.b.example.com/x")["subdomain_count"],
        2.0
    );
    assert_eq!(url::basic_features("http://example.com/")["subdomain_count"], 0.0);
    assert_eq!(url::basic_features("http://localhost/")["subdomain_count"], 0.0);
}

#[test]
fn url_lexical_counts() {
    let features = url::basic_features("https://ex2.com/a?b=19");
    assert_eq!(features["url_length"], 22.0);
    assert_eq!(features["domain_length"], 7.0);
    assert_eq!(features["path_length"], 2.0);
    // '?' and '=' are special; ':', '/', '.' are not.
    assert_eq!(features["special_char_count"], 2.0);
    assert_eq!(features["digit_count"], 3.0);
}

#[test]
fn scheme_is_lowercased_before_comparison() {
    assert_eq!(url::basic_features("HTTPS://EXAMPLE.COM/")["has_https"], 1.0);
    assert_eq!(url::basic_features("http://example.com/")["has_https"], 0.0);
    assert_eq!(url::basic_features("not a url")["has_https"], 0.0);
}

#[test]
fn suspicious_tld_blocklist() {
    assert_eq!(url::basic_features("http://phish.tk/login")["suspicious_tld"], 1.0);
    assert_eq!(url::basic_features("http://bank.com/login")["suspicious_tld"], 0.0);
    assert_eq!(url::basic_features("http://cheap.xyz")["suspicious_tld"], 1.0);
}

#[test]
fn status_code_buckets() {
    let logs: Vec<Value> = [200, 301, 404].iter().map(|s| response_event(*s)).collect();
    let m = network::aggregate(&logs);
    assert!((m["success_ratio"] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(m["redirect_count"], 1.0);
    assert_eq!(m["error_count"], 1.0);
    // No requestWillBeSent entries: request-denominated ratios stay zero.
    assert_eq!(m["total_requests"], 0.0);
    assert_eq!(m["secure_request_ratio"], 0.0);
}

#[test]
fn zero_requests_never_divide() {
    let logs = vec![json!({
        "message": {"method": "Network.dataReceived", "params": {"dataLength": 2048}}
    })];
    let m = network::aggregate(&logs);
    assert_eq!(m["secure_request_ratio"], 0.0);
    assert_eq!(m["http2_ratio"], 0.0);
    assert_eq!(m["http3_ratio"], 0.0);
    assert_eq!(m["script_ratio"], 0.0);
    assert_eq!(m["total_data_kb"], 2.0);
    assert_eq!(m["avg_data_size_kb"], 2.0);
}

#[test]
fn malformed_entries_are_skipped_not_fatal() {
    let logs = vec![
        json!(42),
        json!("not an event"),
        json!([1, 2, 3]),
        json!({"unrelated": true}),
        request_event("https://a.example.test/x"),
        response_event(200),
    ];
    let m = network::aggregate(&logs);
    assert_eq!(m["total_requests"], 1.0);
    assert_eq!(m["unique_domains"], 1.0);
    assert_eq!(m["success_ratio"], 1.0);
}

#[test]
fn rich_response_aggregation() {
    let logs = vec![
        request_event("https://site.example/"),
        request_event("https://cdn.other/app.js"),
        json!({
            "message": {
                "method": "Network.responseReceived",
                "params": {"response": {
                    "status": 200,
                    "protocol": "h2",
                    "securityDetails": {"protocol": "TLS 1.3"},
                    "timing": {"receiveHeadersEnd": 120.5},
                    "headers": {"Content-Type": "text/JavaScript"},
                    "encodedDataLength": 1024
                }}
            }
        }),
    ];
    let m = network::aggregate(&logs);
    assert_eq!(m["total_requests"], 2.0);
    assert_eq!(m["unique_domains"], 2.0);
    assert_eq!(m["external_domain_ratio"], 0.5);
    assert_eq!(m["has_tls_13"], 1.0);
    assert_eq!(m["secure_request_ratio"], 0.5);
    assert_eq!(m["http2_ratio"], 0.5);
    assert_eq!(m["avg_response_time"], 120.5);
    assert_eq!(m["max_response_time"], 120.5);
    // Header casing and value casing are both normalized for the category match.
    assert_eq!(m["script_count"], 1.0);
    assert_eq!(m["script_ratio"], 0.5);
    assert_eq!(m["total_data_kb"], 1.0);
    assert_eq!(m["avg_data_size_kb"], 1.0);
}

#[test]
fn cookie_sightings_are_kind_agnostic() {
    let logs = vec![
        json!({
            "message": {
                "method": "Network.requestWillBeSentExtraInfo",
                "params": {"associatedCookies": [{"name": "session"}]}
            }
        }),
        response_event(200),
    ];
    let m = network::aggregate(&logs);
    assert_eq!(m["cookie_count"], 1.0);
    assert_eq!(m["has_cookies"], 1.0);
}

#[test]
fn phiusiil_url_counts() {
    let m = url::phiusiil_features("http://a-b.example.com/p?x=1&y=2");
    assert_eq!(m["qty_hyphen_url"], 1.0);
    assert_eq!(m["qty_slash_url"], 3.0);
    assert_eq!(m["qty_questionmark_url"], 1.0);
    assert_eq!(m["qty_equal_url"], 2.0);
    assert_eq!(m["qty_and_url"], 1.0);
    assert_eq!(m["qty_dot_url"], 2.0);
    assert_eq!(m["qty_dot_domain"], 2.0);
    assert_eq!(m["qty_hyphen_domain"], 1.0);
    // a, e, a, e, o: vowels in "a-b.example.com"
    assert_eq!(m["qty_vowels_domain"], 5.0);
    assert_eq!(m["domain_length"], 15.0);
}

#[test]
fn public_suffix_length() {
    let m = url::phiusiil_features("https://shop.example.co.uk/checkout");
    assert_eq!(m["tld_length"], 5.0);
    assert_eq!(url::phiusiil_features("http://localhost/")["tld_length"], 0.0);
    assert_eq!(url::phiusiil_features("http://example.com/")["tld_length"], 3.0);
}

#[test]
fn ip_resolved_searches_whole_url() {
    let m = url::phiusiil_features("http://example.com/redirect?to=10.0.0.1");
    assert_eq!(m["qty_ip_resolved"], 1.0);
    // The anchored host check stays negative for the same URL.
    assert_eq!(url::basic_features("http://example.com/redirect?to=10.0.0.1")["has_ip"], 0.0);
}

#[test]
fn phiusiil_network_aggregates() {
    let logs = vec![
        response_event(302),
        json!({
            "message": {
                "method": "Network.requestWillBeSent",
                "params": {"timestamp": 100.0, "request": {"url": "https://x.test/"}}
            }
        }),
        json!({
            "message": {"method": "Network.dataReceived", "params": {"timestamp": 50.0}}
        }),
    ];
    let m = network::phiusiil_aggregate(&logs);
    assert_eq!(m["qty_redirects"], 1.0);
    assert_eq!(m["qty_ssl"], 1.0);
    assert_eq!(m["qty_external_redirection"], 0.0);
    // Mean over every entry, timestamp-less ones included.
    assert_eq!(m["time_response"], 50.0);

    let empty = network::phiusiil_aggregate(&[]);
    assert_eq!(empty["time_response"], 0.0);
    assert_eq!(empty["qty_ssl"], 0.0);
}

#[test]
fn html_counts_are_case_sensitive_substrings() {
    let html = r#"<form><script>var a = 1;</script><script src="x.js"></script>
        <iframe></iframe><IFRAME></IFRAME>
        <a href="http://other.test">x</a><a href='http://q.test'>y</a>"#;
    let m = phishguard_agent::features::html::features(html);
    assert_eq!(m["qty_forms"], 1.0);
    assert_eq!(m["qty_scripts"], 2.0);
    // Uppercase <IFRAME> is not counted: matching is case-sensitive.
    assert_eq!(m["qty_iframes"], 1.0);
    // Only double-quoted href="http matches, by contract.
    assert_eq!(m["qty_external_links"], 1.0);
}

#[test]
fn assembler_zero_fills_reserved_tail() {
    let extractor = FeatureExtractor::new(&PHIUSIIL_54);
    let values = extractor.extract_values(
        "https://shop.example.co.uk/login",
        "<form></form>",
        &[response_event(200)],
    );
    assert_eq!(values.len(), 54);
    for (i, key) in PHIUSIIL_54.keys.iter().enumerate() {
        if key.starts_with("reserved_") {
            assert_eq!(values[i], 0.0, "{}", key);
        }
    }
}

#[test]
fn schema_lookup() {
    assert!(FeatureSchema::by_name("basic-30").is_some());
    assert!(FeatureSchema::by_name("phiusiil-54").is_some());
    assert!(FeatureSchema::by_name("basic-31").is_none());
    assert_eq!(BASIC_30.len(), 30);
    assert_eq!(PHIUSIIL_54.len(), 54);
}

#[test]
fn extraction_is_idempotent() {
    let logs = vec![
        request_event("https://login.bank.example/"),
        response_event(200),
        response_event(301),
    ];
    let html = "<form action='/steal'></form>";
    let target = "https://login.bank.example/session?id=77";

    let extractor = FeatureExtractor::new(&BASIC_30);
    let first = extractor.extract_values(target, html, &logs);
    let second = extractor.extract_values(target, html, &logs);
    assert_eq!(first, second);
}

#[test]
fn vector_carries_capture_identity() {
    let mut capture = phishguard_agent::PageCapture::new("https://example.com/");
    capture.network_logs = vec![response_event(200)];
    let extractor = FeatureExtractor::new(&BASIC_30);
    let fv: FeatureVector = extractor.extract(&capture);
    assert_eq!(fv.schema, "basic-30");
    assert_eq!(fv.analysis_id, capture.analysis_id);
    assert_eq!(fv.as_slice().len(), 30);
}
