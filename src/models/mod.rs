// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod scored;
pub mod store;

pub use document::{Document, MAX_DOCUMENT_CHARS, MIN_DOCUMENT_CHARS};
pub use scored::ScoredDocument;
pub use store::DocumentStore;
