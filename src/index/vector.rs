// file: src/index/vector.rs
// description: ephemeral in-memory vector index with cosine top-k retrieval
// reference: nearest-neighbor retrieval over per-query document sets

use crate::error::{PipelineError, Result};
use crate::index::embeddings::EmbeddingProvider;
use crate::models::{Document, ScoredDocument};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// One (embedding, document) pair per surviving document, scoped to a single
/// query. Immutable after `build`; queries never mutate it.
pub struct VectorIndex {
    entries: Vec<(Vec<f32>, Document)>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl VectorIndex {
    /// Embeds every document in one batch call and builds the index.
    ///
    /// All-or-nothing: an embedding failure leaves no partial index. Zero
    /// documents is a valid input and yields a valid empty index.
    pub async fn build(
        documents: Vec<Document>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        if documents.is_empty() {
            debug!("Building empty vector index");
            return Ok(Self {
                entries: Vec::new(),
                provider,
            });
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let vectors = provider.embed_batch(&texts).await?;

        if vectors.len() != documents.len() {
            return Err(PipelineError::Embedding(format!(
                "embedding count mismatch: {} vector(s) for {} document(s)",
                vectors.len(),
                documents.len()
            )));
        }

        info!("Vector index built over {} document(s)", documents.len());

        Ok(Self {
            entries: vectors.into_iter().zip(documents).collect(),
            provider,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `min(k, len)` most similar documents, best first.
    ///
    /// Ties keep insertion order (the sort is stable). An empty index
    /// answers with an empty result, not an error.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredDocument>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.provider.embed(text).await?;

        let mut ranked: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (vector, _))| (idx, cosine_similarity(&query_vector, vector)))
            .collect();

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(idx, score)| ScoredDocument::new(self.entries[idx].1.clone(), score))
            .collect())
    }
}

/// Cosine similarity of two vectors; 0.0 for degenerate inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
