// file: src/discovery/duckduckgo.rs
// description: DuckDuckGo html-endpoint search provider (no API key required)
// reference: https://html.duckduckgo.com/html/

use crate::config::SearchConfig;
use crate::discovery::provider::{SearchHit, SearchProvider};
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

pub struct DuckDuckGoProvider {
    client: Client,
}

impl DuckDuckGoProvider {
    pub fn new(config: &SearchConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| PipelineError::Discovery(format!("DuckDuckGo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PipelineError::Discovery(format!(
                "DuckDuckGo returned status {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PipelineError::Discovery(format!("Failed to read response: {}", e)))?;

        let hits = parse_result_page(&html, max_results);
        debug!("DuckDuckGo returned {} hit(s)", hits.len());
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Extracts result links from the DuckDuckGo html endpoint markup.
///
/// Results are anchors with class `result__a`; hrefs go through a redirect
/// endpoint carrying the target in the `uddg` query parameter.
fn parse_result_page(html: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a.result__a") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut hits = Vec::new();
    for anchor in document.select(&selector) {
        if hits.len() >= max_results {
            break;
        }

        let Some(raw_href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(target) = resolve_redirect(raw_href) else {
            continue;
        };

        let title = anchor
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        hits.push(SearchHit::with_href(title, target));
    }

    hits
}

/// Unwraps the `uddg` redirect parameter, passing direct links through.
fn resolve_redirect(href: &str) -> Option<String> {
    // Redirect hrefs are scheme-relative ("//duckduckgo.com/l/?uddg=...")
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    if parsed.path().starts_with("/l/") {
        return parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned());
    }

    if matches!(parsed.scheme(), "http" | "https") {
        return Some(absolute);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RESULT_PAGE: &str = r#"
        <html><body>
          <div class="result">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FParis&rut=abc">Paris - Wikipedia</a>
          </div>
          <div class="result">
            <a class="result__a" href="https://example.com/direct">Direct result</a>
          </div>
          <div class="result">
            <a class="result__a">Missing href</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_result_page_unwraps_redirects() {
        let hits = parse_result_page(RESULT_PAGE, 10);

        assert_eq!(hits.len(), 2);
        assert_eq!(
            hits[0].location(),
            Some("https://en.wikipedia.org/wiki/Paris")
        );
        assert_eq!(hits[0].title, "Paris - Wikipedia");
        assert_eq!(hits[1].location(), Some("https://example.com/direct"));
    }

    #[test]
    fn test_parse_result_page_honors_limit() {
        let hits = parse_result_page(RESULT_PAGE, 1);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_resolve_redirect_rejects_other_schemes() {
        assert_eq!(resolve_redirect("javascript:void(0)"), None);
        assert_eq!(
            resolve_redirect("https://example.com/page").as_deref(),
            Some("https://example.com/page")
        );
    }
}
