//! Lexical URL features. The URL is attacker-controlled: every derivation
//! degrades to zero/empty instead of failing.

use super::text;
use super::{flag, FeatureMap};
use psl::{List, Psl};

/// TLDs disproportionately used by phishing campaigns (free/cheap registries).
const SUSPICIOUS_TLDS: [&str; 8] = [".tk", ".ga", ".cf", ".ml", ".gq", ".xyz", ".top", ".pw"];

/// Punctuation counted over the full URL for the PhiUSIIL-compatible set.
const URL_PUNCTUATION: [(&str, char); 17] = [
    ("qty_dot_url", '.'),
    ("qty_hyphen_url", '-'),
    ("qty_underline_url", '_'),
    ("qty_slash_url", '/'),
    ("qty_questionmark_url", '?'),
    ("qty_equal_url", '='),
    ("qty_at_url", '@'),
    ("qty_and_url", '&'),
    ("qty_exclamation_url", '!'),
    ("qty_space_url", ' '),
    ("qty_tilde_url", '~'),
    ("qty_comma_url", ','),
    ("qty_plus_url", '+'),
    ("qty_asterisk_url", '*'),
    ("qty_hashtag_url", '#'),
    ("qty_dollar_url", '$'),
    ("qty_percent_url", '%'),
];

/// Syntactic (scheme, authority, path) split.
///
/// The feature values the classifier was trained on were computed from a
/// purely lexical split: the authority keeps userinfo and port, the scheme is
/// lower-cased, and nothing is validated or normalized. A WHATWG parser is
/// the wrong tool here — it rejects hosts such as `999.999.999.999` that the
/// pattern-only IP check must still observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl UrlParts {
    /// Splits any string into parts; unrecognizable components come back empty.
    pub fn split(url: &str) -> Self {
        let mut parts = UrlParts::default();
        let mut rest = url;

        if let Some(idx) = rest.find(':') {
            let candidate = &rest[..idx];
            let mut chars = candidate.chars();
            let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if valid {
                parts.scheme = candidate.to_ascii_lowercase();
                rest = &rest[idx + 1..];
            }
        }

        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            parts.host = after[..end].to_string();
            rest = &after[end..];
        }

        let end = rest.find(['?', '#']).unwrap_or(rest.len());
        parts.path = rest[..end].to_string();
        parts
    }

    /// Host with userinfo and port stripped, for public-suffix lookups.
    fn registrable(&self) -> &str {
        let no_user = self.host.rsplit('@').next().unwrap_or(&self.host);
        no_user.split(':').next().unwrap_or(no_user)
    }
}

/// The 10 URL features of the basic schema.
pub fn basic_features(url: &str) -> FeatureMap {
    let parts = UrlParts::split(url);
    let lower = url.to_lowercase();

    let mut m = FeatureMap::new();
    m.insert("url_length", url.chars().count() as f64);
    m.insert("domain_length", parts.host.chars().count() as f64);
    m.insert("path_length", parts.path.chars().count() as f64);
    m.insert("has_https", flag(parts.scheme == "https"));
    m.insert("has_ip", flag(text::is_ip_host(&parts.host)));
    m.insert(
        "subdomain_count",
        (parts.host.matches('.').count() as i64 - 1).max(0) as f64,
    );
    m.insert(
        "special_char_count",
        url.chars()
            .filter(|c| !c.is_alphanumeric() && !matches!(c, ':' | '/' | '.'))
            .count() as f64,
    );
    m.insert(
        "digit_count",
        url.chars().filter(|c| c.is_ascii_digit()).count() as f64,
    );
    m.insert("url_entropy", text::shannon_entropy(url));
    // Checked against both the whole URL and the host: a path segment after
    // the TLD must not hide it.
    let host_lower = parts.host.to_lowercase();
    m.insert(
        "suspicious_tld",
        flag(SUSPICIOUS_TLDS
            .iter()
            .any(|tld| lower.ends_with(tld) || host_lower.ends_with(tld))),
    );
    m
}

/// The 25 URL features of the PhiUSIIL-compatible schema.
pub fn phiusiil_features(url: &str) -> FeatureMap {
    let parts = UrlParts::split(url);

    let mut m = FeatureMap::new();
    for (key, ch) in URL_PUNCTUATION {
        m.insert(key, url.matches(ch).count() as f64);
    }
    m.insert("qty_dot_domain", parts.host.matches('.').count() as f64);
    m.insert("qty_hyphen_domain", parts.host.matches('-').count() as f64);
    m.insert("qty_underline_domain", parts.host.matches('_').count() as f64);
    m.insert(
        "qty_vowels_domain",
        parts
            .host
            .chars()
            .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U'))
            .count() as f64,
    );
    m.insert("url_length", url.chars().count() as f64);
    m.insert("domain_length", parts.host.chars().count() as f64);
    m.insert("tld_length", tld_length(parts.registrable()) as f64);
    m.insert("qty_ip_resolved", flag(text::contains_ip_literal(url)));
    m
}

/// Character length of the host's public suffix; 0 when the suffix is not in
/// the public-suffix list (e.g. `localhost`, dotted-quad hosts).
fn tld_length(host: &str) -> usize {
    let lower = host.to_ascii_lowercase();
    match List.suffix(lower.as_bytes()) {
        Some(suffix) if suffix.is_known() => std::str::from_utf8(suffix.as_bytes())
            .map(|s| s.chars().count())
            .unwrap_or(0),
        _ => 0,
    }
}
