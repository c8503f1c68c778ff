// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod index;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use config::{AnswerConfig, Config, EmbeddingConfig, FetchConfig, SearchConfig};
pub use discovery::{DuckDuckGoProvider, SearchHit, SearchProvider, SourceDiscovery};
pub use error::{FetchError, PipelineError, Result};
pub use fetch::{ContentExtractor, FetchCoordinator, HttpRenderer, PageRenderer, SiteRule};
pub use index::{EmbeddingClient, EmbeddingProvider, VectorIndex};
pub use llm::{AlwaysRetrieve, ChatClient, LlmRouter, TextGenerator, ToolRouter};
pub use models::{Document, DocumentStore, MAX_DOCUMENT_CHARS, MIN_DOCUMENT_CHARS, ScoredDocument};
pub use pipeline::{RetrievalPipeline, RetrievalStats};
pub use utils::Validator;
