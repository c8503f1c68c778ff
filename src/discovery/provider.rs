// file: src/discovery/provider.rs
// description: search provider trait and raw result record
// reference: web search service contract

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One raw result from a web search service.
///
/// Providers disagree on the field carrying the location: some emit `href`,
/// others `url`. Both are modeled and `location()` resolves whichever is
/// present, preferring `href`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: String,
}

impl SearchHit {
    pub fn with_href(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// The resolvable location field, if any.
    pub fn location(&self) -> Option<&str> {
        self.href
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.url.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Trait for web search services.
///
/// Implementations must return hits in rank order; the discovery layer
/// preserves that ordering when resolving URLs.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
