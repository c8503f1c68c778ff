// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub fetch: FetchConfig,
    pub embedding: EmbeddingConfig,
    pub answer: AnswerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub provider: String,
    pub max_results: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub page_timeout_secs: u64,
    pub max_concurrent: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub top_k: usize,
    /// Per-passage character budget when building the grounded prompt.
    pub context_chars: usize,
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WEB_RAG")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.fill_api_keys_from_env();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut config = Self {
            search: SearchConfig {
                provider: "duckduckgo".to_string(),
                max_results: 10,
                request_timeout_secs: 10,
            },
            fetch: FetchConfig {
                page_timeout_secs: 15,
                max_concurrent: 4,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            embedding: EmbeddingConfig {
                api_key: None,
                model: "text-embedding-3-small".to_string(),
                endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            },
            answer: AnswerConfig {
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                temperature: 0.7,
                top_k: 3,
                context_chars: 4000,
            },
        };
        config.fill_api_keys_from_env();
        config
    }

    /// A single `OPENAI_API_KEY` covers both services when the per-section
    /// keys are not set explicitly.
    fn fill_api_keys_from_env(&mut self) {
        if self.embedding.api_key.is_none() {
            self.embedding.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.answer.api_key.is_none() {
            self.answer.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            return Err(PipelineError::Config(
                "search.max_results must be greater than 0".to_string(),
            ));
        }

        if self.fetch.max_concurrent == 0 {
            return Err(PipelineError::Config(
                "fetch.max_concurrent must be greater than 0".to_string(),
            ));
        }

        if self.fetch.page_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "fetch.page_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.answer.top_k == 0 {
            return Err(PipelineError::Config(
                "answer.top_k must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.answer.temperature) {
            return Err(PipelineError::Config(
                "answer.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        Ok(())
    }
}
