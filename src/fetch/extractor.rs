// file: src/fetch/extractor.rs
// description: plain-text extraction from rendered HTML using site rules
// reference: https://docs.rs/scraper

use crate::error::FetchError;
use crate::fetch::rules::SiteRule;
use crate::models::MIN_DOCUMENT_CHARS;
use scraper::{ElementRef, Html, Selector};

/// Elements whose subtrees carry no readable content under the default rule.
const NOISE_TAGS: &[&str] = &["script", "style", "noscript", "header", "footer", "nav"];

pub struct ContentExtractor;

impl ContentExtractor {
    /// Extracts readable text from a rendered page.
    ///
    /// Missing scope elements and too-short text are reported as `FetchError`
    /// values; the coordinator treats both as a skipped URL, never a batch
    /// failure.
    pub fn extract(url: &str, html: &str) -> Result<String, FetchError> {
        Self::extract_with_rule(SiteRule::for_url(url), html)
    }

    pub fn extract_with_rule(rule: SiteRule, html: &str) -> Result<String, FetchError> {
        let document = Html::parse_document(html);
        let selector =
            Selector::parse(rule.scope_selector()).expect("scope selectors are valid CSS");

        let scope = document
            .select(&selector)
            .next()
            .ok_or(FetchError::NoContent)?;

        let raw = match rule {
            // Generic pages are full of chrome; skip noise subtrees entirely.
            SiteRule::Default => collect_visible_text(scope),
            _ => scope.text().collect::<Vec<_>>().join(" "),
        };

        let mut text = normalize_whitespace(&raw);

        if let Some(prefix) = rule.strip_prefix() {
            if let Some(rest) = text.strip_prefix(prefix) {
                text = rest.trim_start().to_string();
            }
        }

        let length = text.chars().count();
        if length <= MIN_DOCUMENT_CHARS {
            return Err(FetchError::TooShort(length));
        }

        Ok(text)
    }
}

/// Gathers text nodes below `element`, pruning noise-tag subtrees.
fn collect_visible_text(element: ElementRef) -> String {
    let mut out = String::new();
    append_visible_text(element, &mut out);
    out
}

fn append_visible_text(element: ElementRef, out: &mut String) {
    if NOISE_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            append_visible_text(child_element, out);
        }
    }
}

/// Collapses all whitespace runs to single spaces and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn padding(n: usize) -> String {
        std::iter::repeat("lorem ipsum dolor sit amet")
            .take(n)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_arxiv_rule_strips_abstract_prefix() {
        let body = padding(6);
        let html = format!(
            r#"<html><body>
                <blockquote class="abstract">
                  <span class="descriptor">Abstract:</span>  {}
                </blockquote>
            </body></html>"#,
            body
        );

        let text = ContentExtractor::extract("https://arxiv.org/abs/1234.5678", &html).unwrap();
        assert!(!text.starts_with("Abstract:"));
        assert_eq!(text, body);
    }

    #[test]
    fn test_wikipedia_rule_scopes_to_content_block() {
        let html = format!(
            r#"<html><body>
                <div id="siteNotice">Donate banner</div>
                <div id="mw-content-text"><p>{}</p></div>
                <div id="footer">Footer stuff</div>
            </body></html>"#,
            padding(6)
        );

        let text =
            ContentExtractor::extract("https://en.wikipedia.org/wiki/Paris", &html).unwrap();
        assert!(text.contains("lorem ipsum"));
        assert!(!text.contains("Donate banner"));
        assert!(!text.contains("Footer stuff"));
    }

    #[test]
    fn test_medium_rule_scopes_to_article() {
        let html = format!(
            "<html><body><aside>Related posts</aside><article><p>{}</p></article></body></html>",
            padding(6)
        );

        let text = ContentExtractor::extract("https://medium.com/@a/post", &html).unwrap();
        assert!(text.contains("lorem ipsum"));
        assert!(!text.contains("Related posts"));
    }

    #[test]
    fn test_default_rule_strips_noise_elements() {
        let html = format!(
            r#"<html><body>
                <header>Site header</header>
                <nav>Menu items</nav>
                <script>var x = 1;</script>
                <style>body {{ color: red; }}</style>
                <noscript>Enable JS</noscript>
                <p>{}</p>
                <footer>Copyright notice</footer>
            </body></html>"#,
            padding(6)
        );

        let text = ContentExtractor::extract("https://example.com/page", &html).unwrap();
        assert!(text.contains("lorem ipsum"));
        for noise in ["Site header", "Menu items", "var x", "color: red", "Enable JS", "Copyright"] {
            assert!(!text.contains(noise), "noise leaked: {}", noise);
        }
    }

    #[test]
    fn test_missing_scope_is_no_content() {
        let html = "<html><body><p>No abstract block here, just a paragraph.</p></body></html>";
        let err = ContentExtractor::extract("https://arxiv.org/abs/1", html).unwrap_err();
        assert!(matches!(err, FetchError::NoContent));
    }

    #[test]
    fn test_short_text_is_rejected() {
        let html = "<html><body><p>Too little text.</p></body></html>";
        let err = ContentExtractor::extract("https://example.com", html).unwrap_err();
        assert!(matches!(err, FetchError::TooShort(_)));
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let html = format!(
            "<html><body><p>spaced   out\n\n  text</p><p>{}</p></body></html>",
            padding(6)
        );
        let text = ContentExtractor::extract("https://example.com", &html).unwrap();
        assert!(text.contains("spaced out text"));
    }
}
