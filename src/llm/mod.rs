// file: src/llm/mod.rs
// description: language-model collaborator module exports
// reference: internal module structure

pub mod generator;
pub mod router;

pub use generator::{ChatClient, TextGenerator, build_grounded_prompt};
pub use router::{AlwaysRetrieve, LlmRouter, ToolRouter};
