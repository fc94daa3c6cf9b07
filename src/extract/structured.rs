use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use super::numeric;

/// Mine JSON-LD blocks for Offer/Product price fields. Structured data often
/// carries a range or several seller offers; the minimum is the most likely
/// current sale price.
pub fn jsonld_min(doc: &Html) -> Option<f64> {
    let sel = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    let mut found: Vec<f64> = Vec::new();
    for block in doc.select(&sel) {
        let raw = block.text().collect::<String>();
        let Ok(val) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };
        for node in flatten(&val) {
            collect_node(node, &mut found);
        }
    }
    min_positive(&found)
}

// Arrays and @graph wrappers both hide the interesting nodes one level down.
fn flatten(v: &Value) -> Vec<&Value> {
    match v {
        Value::Array(items) => items.iter().flat_map(flatten).collect(),
        Value::Object(map) => {
            let mut out = vec![v];
            if let Some(graph) = map.get("@graph") {
                out.extend(flatten(graph));
            }
            out
        }
        _ => Vec::new(),
    }
}

fn collect_node(node: &Value, out: &mut Vec<f64>) {
    let ty = declared_type(node).to_ascii_lowercase();
    if ty.contains("offer") {
        collect_offer(node, out);
    }
    if ty.contains("product") {
        match node.get("offers") {
            Some(Value::Array(items)) => {
                for offer in items {
                    collect_offer(offer, out);
                }
            }
            Some(offer @ Value::Object(_)) => collect_offer(offer, out),
            _ => {}
        }
    }
}

fn declared_type(node: &Value) -> String {
    match node.get("@type") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}

fn collect_offer(node: &Value, out: &mut Vec<f64>) {
    for key in ["price", "lowPrice", "highPrice"] {
        match node.get(key) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64() {
                    if v.is_finite() && v > 0.0 {
                        out.push(v);
                    }
                }
            }
            Some(Value::String(s)) => {
                if let Some(v) = numeric::parse_amount(s) {
                    if v > 0.0 {
                        out.push(v);
                    }
                }
            }
            _ => {}
        }
    }
}

fn keyed_bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""(?:finalPrice|sellingPrice|sellerPrice|price)"\s*:\s*"?([0-9][0-9,]*(?:\.[0-9]+)?)"#)
            .expect("keyed bare price regex")
    })
}

fn keyed_nested_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#""(?:finalPrice|sellingPrice|sellerPrice|price)"\s*:\s*\{[^{}]*?"(?:amount|value)"\s*:\s*"?([0-9][0-9,]*(?:\.[0-9]+)?)"#,
        )
        .expect("keyed nested price regex")
    })
}

fn generic_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // three digits minimum, so counts and small IDs don't qualify
        Regex::new(r#""(?:amount|value)"\s*:\s*"?([0-9]{3,}(?:\.[0-9]+)?)"#)
            .expect("generic amount regex")
    })
}

/// Scan all inline script text for serialized application state carrying
/// price-like keys. Broad on purpose; the minimum rule and the resolver's
/// plausibility floor absorb the noise.
pub fn script_state_min(doc: &Html) -> Option<f64> {
    let sel = Selector::parse("script").ok()?;
    let mut found: Vec<f64> = Vec::new();
    for block in doc.select(&sel) {
        let body = block.text().collect::<String>();
        for re in [keyed_bare_re(), keyed_nested_re(), generic_amount_re()] {
            for cap in re.captures_iter(&body) {
                if let Some(v) = numeric::parse_amount(&cap[1]) {
                    if v > 0.0 {
                        found.push(v);
                    }
                }
            }
        }
    }
    min_positive(&found)
}

fn min_positive(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(None, |acc, v| match acc {
            Some(a) if a <= v => Some(a),
            _ => Some(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn jsonld_two_offers_takes_minimum() {
        let html = r#"<html><head><script type="application/ld+json">
            [{"@type":"Offer","price":"750"},{"@type":"Offer","price":"500"}]
        </script></head><body></body></html>"#;
        assert_eq!(jsonld_min(&doc(html)), Some(500.0));
    }

    #[test]
    fn jsonld_product_with_offer_list() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@type":"Product","name":"x","offers":[
                {"@type":"Offer","price":1299.0},
                {"@type":"Offer","price":"1,199"}]}
        </script></head><body></body></html>"#;
        assert_eq!(jsonld_min(&doc(html)), Some(1199.0));
    }

    #[test]
    fn jsonld_aggregate_offer_range() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@type":"Product","offers":{"@type":"AggregateOffer","lowPrice":"899","highPrice":"1499"}}
        </script></head><body></body></html>"#;
        assert_eq!(jsonld_min(&doc(html)), Some(899.0));
    }

    #[test]
    fn jsonld_graph_wrapper() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@context":"https://schema.org","@graph":[{"@type":"Offer","price":"2499"}]}
        </script></head><body></body></html>"#;
        assert_eq!(jsonld_min(&doc(html)), Some(2499.0));
    }

    #[test]
    fn jsonld_malformed_block_is_skipped() {
        let html = r#"<html><head>
            <script type="application/ld+json">{not json</script>
            <script type="application/ld+json">{"@type":"Offer","price":"300"}</script>
        </head><body></body></html>"#;
        assert_eq!(jsonld_min(&doc(html)), Some(300.0));
    }

    #[test]
    fn jsonld_none_without_offers() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@type":"BreadcrumbList","itemListElement":[]}
        </script></head><body></body></html>"#;
        assert_eq!(jsonld_min(&doc(html)), None);
    }

    #[test]
    fn script_state_bare_key() {
        let html = r#"<html><body><script>
            window.__STATE__ = {"product":{"finalPrice":1499,"mrp":2999}};
        </script></body></html>"#;
        assert_eq!(script_state_min(&doc(html)), Some(1499.0));
    }

    #[test]
    fn script_state_nested_amount() {
        let html = r#"<html><body><script>
            var s = {"sellingPrice":{"currency":"INR","amount":"1,299"}};
        </script></body></html>"#;
        assert_eq!(script_state_min(&doc(html)), Some(1299.0));
    }

    #[test]
    fn script_state_generic_amount_needs_three_digits() {
        let html = r#"<html><body><script>
            var a = {"value": 42, "amount": 12};
        </script></body></html>"#;
        assert_eq!(script_state_min(&doc(html)), None);

        let html = r#"<html><body><script>
            var a = {"amount": "8999.00"};
        </script></body></html>"#;
        assert_eq!(script_state_min(&doc(html)), Some(8999.0));
    }
}
