// file: src/fetch/coordinator.rs
// description: bounded concurrent fetch of candidate URLs with failure isolation
// reference: https://docs.rs/futures

use crate::error::FetchError;
use crate::fetch::extractor::ContentExtractor;
use crate::fetch::renderer::PageRenderer;
use crate::models::Document;
use crate::pipeline::progress::ProgressTracker;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs extraction over a URL batch with a fixed concurrency cap.
///
/// The renderer is shared across the batch; every URL gets its own render
/// call. A failed URL is logged and skipped, never fatal. Successful
/// documents come back in input URL order.
pub struct FetchCoordinator {
    renderer: Arc<dyn PageRenderer>,
    max_concurrent: usize,
}

impl FetchCoordinator {
    pub fn new(renderer: Arc<dyn PageRenderer>, max_concurrent: usize) -> Self {
        Self {
            renderer,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetches every URL and keeps the surviving documents.
    pub async fn fetch_all(
        &self,
        urls: &[String],
        progress: Option<&ProgressTracker>,
    ) -> Vec<Document> {
        let outcomes = self.fetch_outcomes(urls, progress).await;

        let mut documents = Vec::with_capacity(outcomes.len());
        for (url, outcome) in outcomes {
            match outcome {
                Ok(document) => documents.push(document),
                Err(reason) => warn!("Skipping {}: {}", url, reason),
            }
        }

        debug!(
            "Fetch batch complete: {} of {} URL(s) yielded documents",
            documents.len(),
            urls.len()
        );
        documents
    }

    /// Per-URL outcomes in input order; the failure tag carries the reason.
    pub async fn fetch_outcomes(
        &self,
        urls: &[String],
        progress: Option<&ProgressTracker>,
    ) -> Vec<(String, Result<Document, FetchError>)> {
        stream::iter(urls.iter().cloned().map(|url| {
            let renderer = Arc::clone(&self.renderer);
            async move {
                let outcome = fetch_one(renderer.as_ref(), &url).await;
                if let Some(tracker) = progress {
                    match &outcome {
                        Ok(_) => tracker.inc_fetched(),
                        Err(_) => tracker.inc_failed(),
                    }
                }
                (url, outcome)
            }
        }))
        .buffered(self.max_concurrent)
        .collect()
        .await
    }
}

async fn fetch_one(renderer: &dyn PageRenderer, url: &str) -> Result<Document, FetchError> {
    let html = renderer.render(url).await?;
    let text = ContentExtractor::extract(url, &html)?;
    Ok(Document::new(text, url.to_string()))
}
