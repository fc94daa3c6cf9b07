use scraper::{Html, Selector};

use super::numeric;
use super::rules::RuleSet;
use super::scan;

/// Run the ordered selector rules for `host` against the parsed document.
///
/// For each rule the first matching element contributes its attribute value
/// or text; the fragment goes through the numeric normalizer and the
/// currency-anchored scanner, and both outcomes join the pool. Returns the
/// pool plus whether any scanned fragment carried a rupee hint.
pub fn collect(doc: &Html, host: &str, rules: &RuleSet) -> (Vec<f64>, bool) {
    let mut pool: Vec<f64> = Vec::new();
    let mut inr = false;

    for rule in rules.rules_for(host) {
        let Ok(sel) = Selector::parse(rule.selector) else {
            continue;
        };
        let Some(node) = doc.select(&sel).next() else {
            continue;
        };
        let frag = match rule.attr {
            Some(name) => node.value().attr(name).unwrap_or("").to_string(),
            None => node.text().collect::<String>(),
        };
        let frag = frag.trim();
        if frag.is_empty() {
            continue;
        }

        if frag.contains('₹') || frag.to_ascii_uppercase().contains("INR") {
            inr = true;
        }
        if !rule.anchored_only {
            if let Some(v) = numeric::parse_amount(frag) {
                pool.push(v);
            }
        }
        pool.extend(scan::currency_anchored(frag));
    }

    (pool, inr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{resolve, rules};

    #[test]
    fn generic_price_class_resolves() {
        let html = r#"<html><body><div class="price">₹2,499</div></body></html>"#;
        let doc = Html::parse_document(html);
        let (pool, inr) = collect(&doc, "shop.example.com", rules::default_rules());
        assert!(inr);
        assert_eq!(resolve::resolve(&pool, inr), Some(2499.0));
    }

    #[test]
    fn meta_content_attribute_is_read() {
        let html = r#"<html><head><meta itemprop="price" content="349.00"></head><body></body></html>"#;
        let doc = Html::parse_document(html);
        let (pool, _) = collect(&doc, "example.com", rules::default_rules());
        assert!(pool.contains(&349.0));
    }

    #[test]
    fn host_specific_rule_takes_first_match() {
        let html = r#"<html><body>
            <div class="Nx9bqj">₹1,299</div>
            <div class="price">₹9,999</div>
        </body></html>"#;
        let doc = Html::parse_document(html);
        let (pool, _) = collect(&doc, "www.flipkart.com", rules::default_rules());
        // flipkart rule fires first; the generic .price rule still contributes
        assert_eq!(pool[0], 1299.0);
        assert!(pool.contains(&9999.0));
    }

    #[test]
    fn secondary_hint_meta_is_anchored_only() {
        let html = r#"<html><head>
            <meta name="twitter:data1" content="US$ 79.99 · 4.5 stars">
        </head><body></body></html>"#;
        let doc = Html::parse_document(html);
        let (pool, _) = collect(&doc, "example.com", rules::default_rules());
        assert_eq!(pool, vec![79.99]);
    }

    #[test]
    fn no_rules_match_empty_pool() {
        let doc = Html::parse_document("<html><body><p>hello</p></body></html>");
        let (pool, inr) = collect(&doc, "example.com", rules::default_rules());
        assert!(pool.is_empty());
        assert!(!inr);
    }
}
