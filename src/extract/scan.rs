use std::sync::OnceLock;

use regex::Regex;

use super::numeric;

fn anchored_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:[₹$€£]|\b(?:rs\.?|inr|usd|eur|gbp))\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)")
            .expect("anchored price regex")
    })
}

fn labeled_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:deal\s*price|price|mrp)\b\s*[:\-–—]?\s*(?:[₹$€£]|rs\.?|inr|usd|eur|gbp)?\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)",
        )
        .expect("labeled price regex")
    })
}

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script\b.*?</script>").expect("script strip regex"))
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style\b.*?</style>").expect("style strip regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag strip regex"))
}

/// Every number immediately following a currency marker. Anchoring to the
/// marker keeps phone numbers, IDs and dates out of the candidate pool.
pub fn currency_anchored(text: &str) -> Vec<f64> {
    anchored_re()
        .captures_iter(text)
        .filter_map(|c| numeric::parse_amount(&c[1]))
        .collect()
}

/// Last-ditch lookup: a "Deal Price" / "Price" / "MRP" label followed by a
/// number, with or without a currency marker in between.
pub fn labeled_price(text: &str) -> Option<f64> {
    labeled_re()
        .captures(text)
        .and_then(|c| numeric::parse_amount(&c[1]))
        .filter(|v| *v > 0.0)
}

/// Visible body text: script and style blocks dropped, then all tags.
pub fn visible_text(html: &str) -> String {
    let no_script = script_re().replace_all(html, " ");
    let no_style = style_re().replace_all(&no_script, " ");
    tag_re().replace_all(&no_style, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_finds_symbol_and_code_prices() {
        let got = currency_anchored("was ₹2,999 now Rs. 1,499 or USD 18.99");
        assert_eq!(got, vec![2999.0, 1499.0, 18.99]);
    }

    #[test]
    fn anchored_ignores_unmarked_numbers() {
        assert!(currency_anchored("call 9876543210 or visit suite 4021").is_empty());
    }

    #[test]
    fn anchored_requires_word_boundary_for_codes() {
        // "colors 5" must not match via the trailing "rs"
        assert!(currency_anchored("available in 6 colors 5 sizes").is_empty());
    }

    #[test]
    fn labeled_price_with_and_without_marker() {
        assert_eq!(labeled_price("MRP: 4,999 incl. taxes"), Some(4999.0));
        assert_eq!(labeled_price("Deal Price - ₹1,299"), Some(1299.0));
        assert_eq!(labeled_price("no numbers here"), None);
    }

    #[test]
    fn visible_text_drops_scripts_and_tags() {
        let html = r#"<html><head><script>var p = "$999";</script><style>.x{}</style></head>
            <body><p>only <b>this</b> text</p></body></html>"#;
        let text = visible_text(html);
        assert!(text.contains("only"));
        assert!(text.contains("this"));
        assert!(!text.contains("$999"));
        assert!(!text.contains("<p>"));
    }
}
