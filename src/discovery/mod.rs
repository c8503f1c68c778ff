// file: src/discovery/mod.rs
// description: source discovery module exports
// reference: internal module structure

pub mod duckduckgo;
pub mod provider;
pub mod service;

pub use duckduckgo::DuckDuckGoProvider;
pub use provider::{SearchHit, SearchProvider};
pub use service::SourceDiscovery;
