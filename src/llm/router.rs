// file: src/llm/router.rs
// description: decision seam for when to invoke web retrieval
// reference: tool routing contract

use crate::error::Result;
use crate::llm::generator::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Decides, per question, whether the retrieval pipeline runs at all or the
/// generator answers directly.
#[async_trait]
pub trait ToolRouter: Send + Sync {
    async fn should_retrieve(&self, query: &str) -> Result<bool>;
}

/// Routes every question through retrieval.
pub struct AlwaysRetrieve;

#[async_trait]
impl ToolRouter for AlwaysRetrieve {
    async fn should_retrieve(&self, _query: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Asks the generator for a yes/no call on whether fresh web information is
/// needed. Unparseable answers default to retrieving.
pub struct LlmRouter {
    generator: Arc<dyn TextGenerator>,
}

impl LlmRouter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ToolRouter for LlmRouter {
    async fn should_retrieve(&self, query: &str) -> Result<bool> {
        let prompt = format!(
            "Does answering the following question benefit from searching the \
             web for current information? Reply with exactly YES or NO.\n\n\
             Question: {}",
            query
        );

        let reply = self.generator.generate(&prompt).await?;
        let decision = !reply.trim().to_ascii_lowercase().starts_with("no");
        debug!("Router decision for query: {}", decision);
        Ok(decision)
    }
}
