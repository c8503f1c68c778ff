// file: src/models/scored.rs
// description: similarity-scored retrieval result
// reference: used for vector similarity search results

use crate::models::Document;
use serde::{Deserialize, Serialize};

/// A document paired with its similarity score for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    /// Cosine similarity to the query embedding (higher is more similar).
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(document: Document, score: f32) -> Self {
        Self { document, score }
    }

    /// Format as a summary string for display.
    pub fn format_summary(&self, max_content_len: usize) -> String {
        let preview = if self.document.char_len() > max_content_len {
            let cut = crate::models::document::truncate_chars(&self.document.text, max_content_len);
            format!("{}...", cut)
        } else {
            self.document.text.clone()
        };

        format!(
            "Score: {:.4} | {}\n{}\n",
            self.score, self.document.source, preview
        )
    }
}
