use scraper::Html;
use url::Url;

mod numeric;
mod resolve;
pub mod rules;
mod scan;
mod selectors;
mod structured;
mod title;

pub use rules::{RuleSet, default_rules};

/// Terminal output of one info extraction call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProductInfo {
    pub price: Option<f64>,
    pub title: Option<String>,
}

/// The price extraction engine: a fixed fallback chain of candidate
/// generating strategies over one shared parse. Purely computational; safe to
/// use concurrently, one candidate pool per call.
pub struct Extractor<'a> {
    rules: &'a RuleSet,
}

impl<'a> Extractor<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Resolve a single price from raw HTML, or None when no stage finds one.
    /// "No price" is an expected outcome, never an error.
    pub fn price(&self, html: &str, url: &str) -> Option<f64> {
        let doc = Html::parse_document(html);
        self.price_from_doc(&doc, html, url)
    }

    /// Price and title from a single parse of the document.
    pub fn product_info(&self, html: &str, url: &str) -> ProductInfo {
        let doc = Html::parse_document(html);
        ProductInfo {
            price: self.price_from_doc(&doc, html, url),
            title: title::extract(&doc),
        }
    }

    fn price_from_doc(&self, doc: &Html, html: &str, url: &str) -> Option<f64> {
        let host = host_of(url);

        // 1. selector rules, hostname-specific before generic
        let (pool, inr) = selectors::collect(doc, &host, self.rules);
        if let Some(p) = resolve::resolve(&pool, inr) {
            return Some(p);
        }

        // 2–3. structured data; minimum-of-found, no resolver
        if let Some(p) = structured::jsonld_min(doc) {
            return Some(p);
        }
        if let Some(p) = structured::script_state_min(doc) {
            return Some(p);
        }

        // 4. currency-anchored scan over the raw markup
        let pool = scan::currency_anchored(html);
        if let Some(p) = resolve::resolve(&pool, has_inr(html)) {
            return Some(p);
        }

        // 5. the same scan over visible text only
        let text = scan::visible_text(html);
        let pool = scan::currency_anchored(&text);
        if let Some(p) = resolve::resolve(&pool, has_inr(&text)) {
            return Some(p);
        }

        // 6. labelled number in visible text, normalized directly
        scan::labeled_price(&text)
    }
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

fn has_inr(text: &str) -> bool {
    text.contains('₹') || text.contains("INR")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor<'static> {
        Extractor::new(default_rules())
    }

    const URL: &str = "https://shop.example.com/item/42";

    #[test]
    fn selector_stage_wins_over_structured_data() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type":"Offer","price":"100"}</script>
        </head><body><div class="price">₹2,499</div></body></html>"#;
        assert_eq!(extractor().price(html, URL), Some(2499.0));
    }

    #[test]
    fn jsonld_fires_when_selectors_miss() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type":"Offer","price":"750"}</script>
        </head><body><p>a product</p></body></html>"#;
        assert_eq!(extractor().price(html, URL), Some(750.0));
    }

    #[test]
    fn anchored_scan_catches_body_prices() {
        let html = "<html><body><p>Grab it for ₹4,999 today</p></body></html>";
        assert_eq!(extractor().price(html, URL), Some(4999.0));
    }

    #[test]
    fn label_stage_is_the_last_resort() {
        // no selectors, no structured data, no currency marker anywhere
        let html = "<html><body><p>MRP: 4,999 (inclusive of all taxes)</p></body></html>";
        assert_eq!(extractor().price(html, URL), Some(4999.0));
    }

    #[test]
    fn no_price_is_none_not_error() {
        let html = "<html><body><p>lovely gadget, ships in 3 days</p></body></html>";
        assert_eq!(extractor().price(html, URL), None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = r#"<html><body><div class="price">$19.99</div><p>also $24.99</p></body></html>"#;
        let ex = extractor();
        let first = ex.price(html, URL);
        assert_eq!(first, ex.price(html, URL));
        assert_eq!(first, Some(19.99));
    }

    #[test]
    fn product_info_shares_one_parse() {
        let html = r#"<html><head><title>Widget Deluxe</title></head>
            <body><div class="price">₹1,499</div></body></html>"#;
        let info = extractor().product_info(html, URL);
        assert_eq!(info.price, Some(1499.0));
        assert_eq!(info.title, Some("Widget Deluxe".to_string()));
    }

    #[test]
    fn hostname_rules_are_dispatched() {
        let html = r#"<html><body><div class="Nx9bqj">₹999</div></body></html>"#;
        assert_eq!(
            extractor().price(html, "https://www.flipkart.com/some-phone/p/x"),
            Some(999.0)
        );
        // unknown host has no rule for that class and falls through to the
        // anchored scan, which still finds the rupee amount
        assert_eq!(extractor().price(html, URL), Some(999.0));
    }
}
