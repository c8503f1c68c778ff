// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source discovery failed: {0}")]
    Discovery(String),

    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Embedding request failed: {0}")]
    Embedding(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-URL failure during page fetching or extraction.
///
/// These never propagate past the fetch coordinator; a failed URL simply
/// contributes no document to the batch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("page load timed out after {0}s")]
    Timeout(u64),

    #[error("http error: {0}")]
    Http(String),

    #[error("http status {0}")]
    Status(u16),

    #[error("unsafe url blocked")]
    UnsafeUrl,

    #[error("no extractable content")]
    NoContent,

    #[error("content too short ({0} chars)")]
    TooShort(usize),
}

impl PipelineError {
    pub fn fetch(url: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }
}
