use scraper::{Html, Selector};

/// Best-effort product title: Open Graph meta, then the document title, then
/// the first h1.
pub fn extract(doc: &Html) -> Option<String> {
    if let Some(t) = meta_content(doc, r#"meta[property="og:title"]"#) {
        return Some(t);
    }
    for sel_str in ["title", "h1"] {
        if let Some(t) = element_text(doc, sel_str) {
            return Some(t);
        }
    }
    None
}

fn meta_content(doc: &Html, sel_str: &str) -> Option<String> {
    let sel = Selector::parse(sel_str).ok()?;
    let node = doc.select(&sel).next()?;
    let content = node.value().attr("content")?.trim();
    if content.is_empty() { None } else { Some(content.to_string()) }
}

fn element_text(doc: &Html, sel_str: &str) -> Option<String> {
    let sel = Selector::parse(sel_str).ok()?;
    let node = doc.select(&sel).next()?;
    let text = node.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_title_preferred() {
        let html = r#"<html><head>
            <meta property="og:title" content="Widget Deluxe">
            <title>store page</title>
        </head><body><h1>something else</h1></body></html>"#;
        let doc = Html::parse_document(html);
        assert_eq!(extract(&doc), Some("Widget Deluxe".to_string()));
    }

    #[test]
    fn title_element_fallback() {
        let html = "<html><head><title> Widget Basic </title></head><body></body></html>";
        let doc = Html::parse_document(html);
        assert_eq!(extract(&doc), Some("Widget Basic".to_string()));
    }

    #[test]
    fn h1_fallback() {
        let html = "<html><body><h1>Bare Heading</h1></body></html>";
        let doc = Html::parse_document(html);
        assert_eq!(extract(&doc), Some("Bare Heading".to_string()));
    }

    #[test]
    fn none_when_untitled() {
        let doc = Html::parse_document("<html><body><p>text</p></body></html>");
        assert_eq!(extract(&doc), None);
    }
}
