// file: src/index/embeddings.rs
// description: OpenAI-compatible embedding service client
// reference: https://platform.openai.com/docs/api-reference/embeddings

use crate::config::EmbeddingConfig;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Embedding service seam.
///
/// A batch call is all-or-nothing: either every input gets a vector or the
/// whole call fails. Partial indexes are never built from a partial batch.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = [text.to_string()];
        let mut vectors = self.embed_batch(&input).await?;
        vectors
            .pop()
            .ok_or_else(|| PipelineError::Embedding("empty response for single input".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

pub struct EmbeddingClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl EmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PipelineError::Config(
                "embedding.api_key is not set (or OPENAI_API_KEY in the environment)".to_string(),
            )
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            input: texts.to_vec(),
            model: self.model.clone(),
        };

        debug!("Requesting embeddings for {} text(s)", texts.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Embedding(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PipelineError::Embedding(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Embedding(format!("malformed response: {}", e)))?;

        if parsed.data.len() != texts.len() {
            return Err(PipelineError::Embedding(format!(
                "expected {} vector(s), got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        debug!(
            "Received {} embedding(s) of dimension {}",
            parsed.data.len(),
            parsed.data.first().map(|d| d.embedding.len()).unwrap_or(0)
        );

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}
