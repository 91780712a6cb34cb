//! Structural counts over the raw HTML snapshot. Deliberately lexical:
//! case-sensitive substring matches, no DOM parsing, no attribute-quote
//! normalization. Any previously trained model saw exactly these counts.

use super::FeatureMap;

pub fn features(html: &str) -> FeatureMap {
    let mut m = FeatureMap::new();
    m.insert("qty_forms", html.matches("<form").count() as f64);
    m.insert("qty_iframes", html.matches("<iframe").count() as f64);
    m.insert("qty_scripts", html.matches("<script").count() as f64);
    m.insert(
        "qty_external_links",
        html.matches("href=\"http").count() as f64,
    );
    m
}
