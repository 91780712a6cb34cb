//! Feature schemas: the ordered key lists that define vector layout.
//!
//! A schema is a versioned artifact shared with whatever trained the
//! classifier. The keys are explicit constants — never derived from a map's
//! iteration order — because a silent reordering produces a wrong but
//! well-typed vector, the worst failure mode this crate has.

/// Named, ordered feature key list. The assembler emits exactly
/// `keys.len()` values, in this order, for this schema.
#[derive(Debug, PartialEq, Eq)]
pub struct FeatureSchema {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

impl FeatureSchema {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Look up a canonical schema by its registered name.
    pub fn by_name(name: &str) -> Option<&'static FeatureSchema> {
        match name {
            "basic-30" => Some(&BASIC_30),
            "phiusiil-54" => Some(&PHIUSIIL_54),
            _ => None,
        }
    }
}

/// 30-feature layout: 10 URL + 20 network aggregate features.
pub static BASIC_30: FeatureSchema = FeatureSchema {
    name: "basic-30",
    keys: &[
        // URL (10)
        "url_length",
        "domain_length",
        "path_length",
        "has_https",
        "has_ip",
        "subdomain_count",
        "special_char_count",
        "digit_count",
        "url_entropy",
        "suspicious_tld",
        // Network (20)
        "total_requests",
        "unique_domains",
        "external_domain_ratio",
        "avg_response_time",
        "max_response_time",
        "has_tls_13",
        "secure_request_ratio",
        "http2_ratio",
        "http3_ratio",
        "redirect_count",
        "error_count",
        "success_ratio",
        "script_count",
        "image_count",
        "css_count",
        "script_ratio",
        "total_data_kb",
        "avg_data_size_kb",
        "cookie_count",
        "has_cookies",
    ],
};

/// 54-feature PhiUSIIL-compatible layout: 25 URL + 4 network + 4 HTML
/// features, then reserved positions. The authoritative tail of the dataset's
/// column list is not available here, so positions 34-54 are named
/// `reserved_NN` and stay zero-filled rather than carrying invented
/// derivations.
pub static PHIUSIIL_54: FeatureSchema = FeatureSchema {
    name: "phiusiil-54",
    keys: &[
        // URL (25)
        "qty_dot_url",
        "qty_hyphen_url",
        "qty_underline_url",
        "qty_slash_url",
        "qty_questionmark_url",
        "qty_equal_url",
        "qty_at_url",
        "qty_and_url",
        "qty_exclamation_url",
        "qty_space_url",
        "qty_tilde_url",
        "qty_comma_url",
        "qty_plus_url",
        "qty_asterisk_url",
        "qty_hashtag_url",
        "qty_dollar_url",
        "qty_percent_url",
        "qty_dot_domain",
        "qty_hyphen_domain",
        "qty_underline_domain",
        "qty_vowels_domain",
        "url_length",
        "domain_length",
        "tld_length",
        "qty_ip_resolved",
        // Network (4)
        "time_response",
        "qty_redirects",
        "qty_external_redirection",
        "qty_ssl",
        // HTML (4)
        "qty_forms",
        "qty_iframes",
        "qty_external_links",
        "qty_scripts",
        // Reserved tail (21)
        "reserved_34",
        "reserved_35",
        "reserved_36",
        "reserved_37",
        "reserved_38",
        "reserved_39",
        "reserved_40",
        "reserved_41",
        "reserved_42",
        "reserved_43",
        "reserved_44",
        "reserved_45",
        "reserved_46",
        "reserved_47",
        "reserved_48",
        "reserved_49",
        "reserved_50",
        "reserved_51",
        "reserved_52",
        "reserved_53",
        "reserved_54",
    ],
};
