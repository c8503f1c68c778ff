// file: src/llm/generator.rs
// description: text generation seam and OpenAI-compatible chat client
// reference: https://platform.openai.com/docs/api-reference/chat

use crate::config::AnswerConfig;
use crate::error::{PipelineError, Result};
use crate::models::ScoredDocument;
use crate::models::document::truncate_chars;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prompt-to-text capability; the pipeline's only contract with the
/// language-model layer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct ChatClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
}

impl ChatClient {
    pub fn new(config: &AnswerConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PipelineError::Config(
                "answer.api_key is not set (or OPENAI_API_KEY in the environment)".to_string(),
            )
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        debug!("Requesting completion ({} prompt chars)", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PipelineError::Generation(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Generation(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| PipelineError::Generation("no choices in response".to_string()))
    }
}

/// Builds the grounded prompt: numbered context passages with their source
/// URLs, then the question. Passages are capped at `context_chars` each so
/// the prompt stays within model limits.
pub fn build_grounded_prompt(query: &str, context: &[ScoredDocument], context_chars: usize) -> String {
    if context.is_empty() {
        return format!(
            "Answer the following question. No web context could be retrieved, \
             so answer from your own knowledge and say so if you are unsure.\n\n\
             Question: {}",
            query
        );
    }

    let mut prompt = String::from(
        "Answer the question using the context passages below. \
         Cite passage numbers where relevant. If the context does not contain \
         the answer, say so.\n\n",
    );

    for (idx, scored) in context.iter().enumerate() {
        let passage = truncate_chars(&scored.document.text, context_chars);
        prompt.push_str(&format!(
            "[{}] (source: {})\n{}\n\n",
            idx + 1,
            scored.document.source,
            passage
        ));
    }

    prompt.push_str(&format!("Question: {}", query));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    fn scored(text: &str, source: &str) -> ScoredDocument {
        ScoredDocument::new(Document::new(text.to_string(), source.to_string()), 0.9)
    }

    #[test]
    fn test_grounded_prompt_numbers_passages_with_sources() {
        let context = vec![
            scored("Paris is the capital of France.", "https://a.example"),
            scored("France is in Europe.", "https://b.example"),
        ];

        let prompt = build_grounded_prompt("capital of France", &context, 1000);
        assert!(prompt.contains("[1] (source: https://a.example)"));
        assert!(prompt.contains("[2] (source: https://b.example)"));
        assert!(prompt.contains("Paris is the capital of France."));
        assert!(prompt.ends_with("Question: capital of France"));
    }

    #[test]
    fn test_grounded_prompt_caps_passage_length() {
        let context = vec![scored(&"x".repeat(500), "https://a.example")];
        let prompt = build_grounded_prompt("q", &context, 100);
        assert!(!prompt.contains(&"x".repeat(101)));
        assert!(prompt.contains(&"x".repeat(100)));
    }

    #[test]
    fn test_empty_context_prompt_still_asks_the_question() {
        let prompt = build_grounded_prompt("capital of France", &[], 1000);
        assert!(prompt.contains("Question: capital of France"));
        assert!(prompt.contains("No web context"));
    }

    #[test]
    fn test_chat_client_requires_api_key() {
        let config = AnswerConfig {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            temperature: 0.7,
            top_k: 3,
            context_chars: 4000,
        };
        assert!(ChatClient::new(&config).is_err());
    }
}
