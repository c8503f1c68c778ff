// file: src/index/mod.rs
// description: embedding and vector index module exports
// reference: internal module structure

pub mod embeddings;
pub mod vector;

pub use embeddings::{EmbeddingClient, EmbeddingProvider};
pub use vector::{VectorIndex, cosine_similarity};
