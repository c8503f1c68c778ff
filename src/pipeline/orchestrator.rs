// file: src/pipeline/orchestrator.rs
// description: end-to-end retrieval pipeline for a single question
// reference: discover -> fetch -> store -> index -> retrieve -> generate

use crate::config::Config;
use crate::discovery::{DuckDuckGoProvider, SearchProvider, SourceDiscovery};
use crate::error::{PipelineError, Result};
use crate::fetch::{FetchCoordinator, HttpRenderer, PageRenderer};
use crate::index::{EmbeddingClient, EmbeddingProvider, VectorIndex};
use crate::llm::{ChatClient, TextGenerator, build_grounded_prompt};
use crate::models::{DocumentStore, ScoredDocument};
use crate::pipeline::progress::{ProgressTracker, RetrievalStats};
use crate::utils::Validator;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Orchestrates one question's retrieval from scratch.
///
/// Every `retrieve` call builds its own document set and vector index;
/// nothing is shared or cached between queries.
pub struct RetrievalPipeline {
    config: Config,
    discovery: SourceDiscovery,
    coordinator: FetchCoordinator,
    embeddings: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
    show_progress: bool,
}

impl RetrievalPipeline {
    /// Builds the pipeline with production components from config.
    pub fn new(config: Config) -> Result<Self> {
        let provider: Arc<dyn SearchProvider> = match config.search.provider.as_str() {
            "duckduckgo" => Arc::new(DuckDuckGoProvider::new(
                &config.search,
                &config.fetch.user_agent,
            )?),
            other => {
                return Err(PipelineError::Config(format!(
                    "Unknown search provider: {}",
                    other
                )));
            }
        };
        let renderer: Arc<dyn PageRenderer> = Arc::new(HttpRenderer::new(&config.fetch)?);
        let embeddings: Arc<dyn EmbeddingProvider> =
            Arc::new(EmbeddingClient::new(&config.embedding)?);
        let generator: Arc<dyn TextGenerator> = Arc::new(ChatClient::new(&config.answer)?);

        Ok(Self::with_components(
            config, provider, renderer, embeddings, generator,
        ))
    }

    /// Assembles the pipeline from explicit components.
    pub fn with_components(
        config: Config,
        provider: Arc<dyn SearchProvider>,
        renderer: Arc<dyn PageRenderer>,
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let discovery = SourceDiscovery::new(provider);
        let coordinator = FetchCoordinator::new(renderer, config.fetch.max_concurrent);

        Self {
            config,
            discovery,
            coordinator,
            embeddings,
            generator,
            show_progress: false,
        }
    }

    /// Enables the fetch-stage progress bar (interactive use only).
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        Arc::clone(&self.generator)
    }

    /// Runs discovery through top-k retrieval for one question.
    ///
    /// Zero surviving documents is a valid outcome: the result set is empty
    /// and the caller answers from no context. Only discovery and embedding
    /// failures are fatal; per-URL fetch failures are absorbed upstream.
    pub async fn retrieve(&self, query: &str) -> Result<(Vec<ScoredDocument>, RetrievalStats)> {
        Validator::validate_query(query)?;
        let start = Instant::now();

        let urls = self
            .discovery
            .discover(query, self.config.search.max_results)
            .await?;

        let tracker = if self.show_progress && !urls.is_empty() {
            Some(ProgressTracker::new(urls.len()))
        } else {
            None
        };

        let fetched = self.coordinator.fetch_all(&urls, tracker.as_ref()).await;
        if let Some(tracker) = &tracker {
            tracker.finish();
        }

        let documents_fetched = fetched.len();
        let fetch_failures = urls.len() - documents_fetched;
        let documents = DocumentStore::build(fetched);

        if documents.is_empty() {
            warn!("No usable documents survived extraction; answering without context");
        }

        let documents_indexed = documents.len();
        let index = VectorIndex::build(documents, Arc::clone(&self.embeddings)).await?;
        let top = index.query(query, self.config.answer.top_k).await?;

        let stats = RetrievalStats {
            urls_discovered: urls.len(),
            documents_fetched,
            fetch_failures,
            documents_indexed,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Retrieval complete: {} URL(s) -> {} document(s) -> top {} in {} ms",
            stats.urls_discovered,
            stats.documents_indexed,
            top.len(),
            stats.duration_ms
        );

        Ok((top, stats))
    }

    /// Full RAG answer: retrieve context, then generate grounded prose.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let (top, _stats) = self.retrieve(query).await?;
        let prompt = build_grounded_prompt(query, &top, self.config.answer.context_chars);
        self.generator.generate(&prompt).await
    }

    /// Ungrounded answer straight from the generator, for contrast.
    pub async fn answer_direct(&self, query: &str) -> Result<String> {
        Validator::validate_query(query)?;
        self.generator.generate(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::SearchHit;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StaticProvider {
        hits: Vec<SearchHit>,
    }

    #[async_trait]
    impl SearchProvider for StaticProvider {
        async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
            Ok(self.hits.iter().take(max_results).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    struct MapRenderer {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageRenderer for MapRenderer {
        async fn render(&self, url: &str) -> std::result::Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Http("connection refused".to_string()))
        }
    }

    /// Counts keyword hits per axis; "paris"-heavy text lands close to a
    /// "paris" query.
    struct KeywordEmbedder;

    #[async_trait]
    impl EmbeddingProvider for KeywordEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let lower = t.to_lowercase();
                    vec![
                        lower.matches("paris").count() as f32,
                        lower.matches("travel").count() as f32,
                        1.0,
                    ]
                })
                .collect())
        }
    }

    /// Echoes the prompt so tests can inspect what the generator saw.
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_string())
        }
    }

    const WIKI_URL: &str = "https://en.wikipedia.org/wiki/Paris";
    const BLOG_URL: &str = "https://travelblog.example/france";

    fn wiki_page() -> String {
        format!(
            r#"<html><body><div id="mw-content-text"><p>Paris is the capital and
            largest city of France. {}</p></div></body></html>"#,
            "The city of Paris sits on the Seine. ".repeat(10)
        )
    }

    fn blog_page() -> String {
        format!(
            "<html><body><p>My travel notes from a trip through France. {}</p></body></html>",
            "Lovely travel destinations everywhere. ".repeat(10)
        )
    }

    fn pipeline_with(
        hits: Vec<SearchHit>,
        pages: Vec<(&str, String)>,
    ) -> RetrievalPipeline {
        let mut config = Config::default_config();
        config.answer.top_k = 3;
        config.search.max_results = 10;

        RetrievalPipeline::with_components(
            config,
            Arc::new(StaticProvider { hits }),
            Arc::new(MapRenderer {
                pages: pages
                    .into_iter()
                    .map(|(url, html)| (url.to_string(), html))
                    .collect(),
            }),
            Arc::new(KeywordEmbedder),
            Arc::new(EchoGenerator),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_ranks_wikipedia_first() {
        let pipeline = pipeline_with(
            vec![
                SearchHit::with_href("Paris - Wikipedia", WIKI_URL),
                SearchHit::with_href("Travel blog", BLOG_URL),
            ],
            vec![(WIKI_URL, wiki_page()), (BLOG_URL, blog_page())],
        );

        let (top, stats) = pipeline.retrieve("capital of France Paris").await.unwrap();

        assert_eq!(stats.urls_discovered, 2);
        assert_eq!(stats.documents_indexed, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].document.source, WIKI_URL);
        assert!(top[0].document.text.contains("Paris"));
    }

    #[tokio::test]
    async fn test_answer_feeds_retrieved_context_to_generator() {
        let pipeline = pipeline_with(
            vec![
                SearchHit::with_href("Paris - Wikipedia", WIKI_URL),
                SearchHit::with_href("Travel blog", BLOG_URL),
            ],
            vec![(WIKI_URL, wiki_page()), (BLOG_URL, blog_page())],
        );

        let prompt = pipeline.answer("capital of France Paris").await.unwrap();

        assert!(prompt.contains(&format!("[1] (source: {})", WIKI_URL)));
        assert!(prompt.contains("capital and"));
    }

    #[tokio::test]
    async fn test_empty_discovery_still_produces_an_answer() {
        let pipeline = pipeline_with(vec![], vec![]);

        let answer = pipeline.answer("obscure question").await.unwrap();
        assert!(answer.contains("No web context"));
    }

    #[tokio::test]
    async fn test_failed_fetches_do_not_fail_the_query() {
        let pipeline = pipeline_with(
            vec![
                SearchHit::with_href("Paris - Wikipedia", WIKI_URL),
                SearchHit::with_href("Dead link", "https://dead.example"),
            ],
            vec![(WIKI_URL, wiki_page())],
        );

        let (top, stats) = pipeline.retrieve("capital of France Paris").await.unwrap();
        assert_eq!(stats.fetch_failures, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].document.source, WIKI_URL);
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let pipeline = pipeline_with(vec![], vec![]);
        assert!(pipeline.retrieve("   ").await.is_err());
    }
}
