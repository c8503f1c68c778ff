// file: src/models/store.rs
// description: final sizing gate applied to fetched documents before indexing
// reference: internal data structures

use crate::models::document::{Document, MIN_DOCUMENT_CHARS};
use tracing::debug;

/// Pure, synchronous filter between fetching and indexing.
///
/// Extraction already drops too-short pages and `Document::new` truncates
/// oversized text; this is the last gate guaranteeing both invariants hold
/// for everything handed to the vector index.
pub struct DocumentStore;

impl DocumentStore {
    pub fn build(raw: Vec<Document>) -> Vec<Document> {
        let before = raw.len();
        let documents: Vec<Document> = raw
            .into_iter()
            .filter(|doc| doc.char_len() > MIN_DOCUMENT_CHARS)
            .collect();

        if documents.len() < before {
            debug!(
                "Document store dropped {} undersized document(s)",
                before - documents.len()
            );
        }

        documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::MAX_DOCUMENT_CHARS;

    fn doc(text: &str) -> Document {
        Document::new(text.to_string(), "https://example.com".to_string())
    }

    #[test]
    fn test_build_drops_short_documents() {
        let long = "a".repeat(MIN_DOCUMENT_CHARS + 1);
        let boundary = "b".repeat(MIN_DOCUMENT_CHARS);
        let docs = DocumentStore::build(vec![doc(&long), doc("tiny"), doc(&boundary)]);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].char_len(), MIN_DOCUMENT_CHARS + 1);
    }

    #[test]
    fn test_build_keeps_truncated_documents() {
        let oversized = "c".repeat(MAX_DOCUMENT_CHARS + 1000);
        let docs = DocumentStore::build(vec![doc(&oversized)]);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].char_len(), MAX_DOCUMENT_CHARS);
    }

    #[test]
    fn test_build_empty_input() {
        assert!(DocumentStore::build(vec![]).is_empty());
    }
}
