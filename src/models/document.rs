// file: src/models/document.rs
// description: core document model with provenance and sizing invariants
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum characters a stored document may carry; longer text is truncated.
pub const MAX_DOCUMENT_CHARS: usize = 50_000;

/// Minimum characters (exclusive) a document must have to be kept at all.
pub const MIN_DOCUMENT_CHARS: usize = 100;

/// One successfully extracted web page, immutable once built.
///
/// Documents live for a single query: the pipeline builds a fresh set per
/// question and discards them when the answer is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub source: String,
    pub fetched_at: u64,
}

impl Document {
    /// Wraps extracted text with its source URL, truncating oversized text.
    pub fn new(text: String, source: String) -> Self {
        let text = truncate_chars(&text, MAX_DOCUMENT_CHARS);
        let fetched_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            text,
            source,
            fetched_at,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Cuts `text` at `max` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
