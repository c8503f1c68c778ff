// file: src/fetch/mod.rs
// description: fetching and extraction module exports
// reference: internal module structure

pub mod coordinator;
pub mod extractor;
pub mod renderer;
pub mod rules;

pub use coordinator::FetchCoordinator;
pub use extractor::ContentExtractor;
pub use renderer::{HttpRenderer, PageRenderer};
pub use rules::SiteRule;
