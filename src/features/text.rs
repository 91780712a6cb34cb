//! Lexical helpers shared by the URL extractors: Shannon entropy, IPv4 literals.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Dotted-quad literal anchored to the whole host. Pattern-only: octets are
/// not range-checked, so `999.999.999.999` matches.
static HOST_IPV4: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("HOST_IPV4 regex"));

/// Same literal, searched anywhere in the string.
static ANY_IPV4: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").expect("ANY_IPV4 regex"));

/// True when the host is exactly a dotted-quad literal.
pub fn is_ip_host(host: &str) -> bool {
    HOST_IPV4.is_match(host)
}

/// True when a dotted-quad literal appears anywhere in `text`.
pub fn contains_ip_literal(text: &str) -> bool {
    ANY_IPV4.is_match(text)
}

/// Shannon entropy (base 2) over the character-frequency distribution.
/// Empty input and single-character alphabets are exactly 0.0.
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in text.chars() {
        *freq.entry(c).or_insert(0) += 1;
        len += 1;
    }

    let n = len as f64;
    freq.values()
        .map(|count| {
            let p = *count as f64 / n;
            -p * p.log2()
        })
        .sum()
}
