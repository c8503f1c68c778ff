// file: src/discovery/service.rs
// description: candidate URL discovery over a search provider
// reference: source discovery contract

use crate::discovery::provider::SearchProvider;
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns a question into a capped, rank-ordered list of candidate URLs.
pub struct SourceDiscovery {
    provider: Arc<dyn SearchProvider>,
}

impl SourceDiscovery {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Returns up to `max_results` URLs in search-rank order.
    ///
    /// Over-fetches twice the requested count since hits without a resolvable
    /// location are skipped. Under-fill is expected and tolerated downstream;
    /// only a provider error is fatal.
    pub async fn discover(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        debug!(
            "Discovering sources via {} for: {}",
            self.provider.name(),
            query
        );

        let raw = self.provider.search(query, max_results * 2).await?;

        let mut urls = Vec::with_capacity(max_results);
        for hit in &raw {
            if let Some(location) = hit.location() {
                urls.push(location.to_string());
                if urls.len() >= max_results {
                    break;
                }
            }
        }

        info!(
            "Discovered {} candidate URL(s) from {} raw hit(s)",
            urls.len(),
            raw.len()
        );
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::provider::SearchHit;
    use crate::error::PipelineError;
    use async_trait::async_trait;

    struct StaticProvider {
        hits: Vec<SearchHit>,
        fail: bool,
    }

    #[async_trait]
    impl SearchProvider for StaticProvider {
        async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
            if self.fail {
                return Err(PipelineError::Discovery("service unreachable".to_string()));
            }
            Ok(self.hits.iter().take(max_results).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    fn provider_with(hits: Vec<SearchHit>) -> SourceDiscovery {
        SourceDiscovery::new(Arc::new(StaticProvider { hits, fail: false }))
    }

    #[tokio::test]
    async fn test_discover_caps_and_preserves_order() {
        let hits = (0..8)
            .map(|i| SearchHit::with_href(format!("hit {}", i), format!("https://site{}.example", i)))
            .collect();
        let discovery = provider_with(hits);

        let urls = discovery.discover("query", 3).await.unwrap();
        assert_eq!(
            urls,
            vec![
                "https://site0.example",
                "https://site1.example",
                "https://site2.example"
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_skips_hits_without_location() {
        let hits = vec![
            SearchHit::with_href("a", "https://a.example"),
            SearchHit::default(),
            SearchHit {
                url: Some("https://b.example".to_string()),
                ..Default::default()
            },
        ];
        let discovery = provider_with(hits);

        let urls = discovery.discover("query", 5).await.unwrap();
        assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
    }

    #[tokio::test]
    async fn test_discover_tolerates_underfill() {
        let hits = vec![SearchHit::with_href("a", "https://a.example")];
        let discovery = provider_with(hits);

        let urls = discovery.discover("query", 10).await.unwrap();
        assert_eq!(urls.len(), 1);
    }

    #[tokio::test]
    async fn test_discover_is_deterministic_for_fixed_provider() {
        let hits = vec![
            SearchHit::with_href("a", "https://a.example"),
            SearchHit::with_href("b", "https://b.example"),
        ];
        let discovery = provider_with(hits);

        let first = discovery.discover("query", 2).await.unwrap();
        let second = discovery.discover("query", 2).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_discover_propagates_provider_error() {
        let discovery = SourceDiscovery::new(Arc::new(StaticProvider {
            hits: vec![],
            fail: true,
        }));

        let err = discovery.discover("query", 3).await.unwrap_err();
        assert!(matches!(err, PipelineError::Discovery(_)));
    }
}
