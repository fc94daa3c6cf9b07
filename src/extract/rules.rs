use std::sync::OnceLock;

/// One structural lookup: a CSS selector plus, optionally, the attribute to
/// read instead of the element text. `anchored_only` marks hint rules whose
/// content is only mined for currency-anchored numbers (secondary meta tags
/// that mix prices with other text).
pub struct SelectorRule {
    pub selector: &'static str,
    pub attr: Option<&'static str>,
    pub anchored_only: bool,
}

const fn text(selector: &'static str) -> SelectorRule {
    SelectorRule { selector, attr: None, anchored_only: false }
}

const fn attr(selector: &'static str, attr: &'static str) -> SelectorRule {
    SelectorRule { selector, attr: Some(attr), anchored_only: false }
}

const fn hint(selector: &'static str, attr: &'static str) -> SelectorRule {
    SelectorRule { selector, attr: Some(attr), anchored_only: true }
}

/// Ordered selector rules: hostname-specific tables first, generic fallbacks
/// after. Hostnames match by substring, so `amazon` covers amazon.in and
/// amazon.com alike.
pub struct RuleSet {
    host_rules: Vec<(&'static str, Vec<SelectorRule>)>,
    generic: Vec<SelectorRule>,
}

impl RuleSet {
    pub fn rules_for(&self, host: &str) -> Vec<&SelectorRule> {
        let mut out = Vec::new();
        for (needle, rules) in &self.host_rules {
            if host.contains(needle) {
                out.extend(rules.iter());
            }
        }
        out.extend(self.generic.iter());
        out
    }
}

/// Built once per process and shared read-only across extraction calls.
pub fn default_rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(|| RuleSet {
        host_rules: vec![
            (
                "amazon",
                vec![
                    text("#priceblock_dealprice"),
                    text("#priceblock_ourprice"),
                    text("#corePrice_feature_div span.a-offscreen"),
                    text("span.a-price span.a-offscreen"),
                ],
            ),
            (
                "flipkart",
                vec![
                    text("div.Nx9bqj"),
                    text("div._30jeq3._16Jk6d"),
                    text("div._30jeq3"),
                ],
            ),
            (
                "myntra",
                vec![text("span.pdp-price strong"), text(".pdp-price")],
            ),
            ("snapdeal", vec![text("span.payBlkBig")]),
            (
                "ebay",
                vec![text(".x-price-primary span.ux-textspans"), text("#prcIsum")],
            ),
        ],
        generic: vec![
            attr("meta[itemprop=price]", "content"),
            text("[itemprop=price]"),
            attr(r#"meta[property="product:price:amount"]"#, "content"),
            attr(r#"meta[property="og:price:amount"]"#, "content"),
            attr("[data-price]", "data-price"),
            text(".price"),
            text(".product-price"),
            text(".price-value"),
            text(".offer-price"),
            text(".selling-price"),
            text("span.amount"),
            // secondary hint slot; often "US$ 79.99 · In stock" style
            hint(r#"meta[name="twitter:data1"]"#, "content"),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_rules_come_before_generic() {
        let rules = default_rules();
        let for_amazon = rules.rules_for("www.amazon.in");
        assert_eq!(for_amazon[0].selector, "#priceblock_dealprice");
        assert!(for_amazon.len() > rules.rules_for("example.com").len());
    }

    #[test]
    fn unknown_host_gets_generic_only() {
        let rules = default_rules();
        let generic = rules.rules_for("shop.example.com");
        assert_eq!(generic[0].selector, "meta[itemprop=price]");
    }
}
