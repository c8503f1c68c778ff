// file: src/fetch/renderer.rs
// description: rendered-page acquisition behind a trait seam
// reference: https://docs.rs/reqwest

use crate::config::FetchConfig;
use crate::error::{FetchError, PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Source of rendered HTML for a URL.
///
/// The production implementation is a plain HTTP client; a browser-backed
/// rendering service plugs in behind the same trait. Implementations must
/// bound each render by the configured page timeout and wait only for the
/// document itself, never for sub-resource idle.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// HTTP renderer with a realistic browser identity string.
///
/// One renderer is shared across a whole fetch batch; each render issues its
/// own request, so nothing is shared between concurrent fetches beyond the
/// connection pool.
pub struct HttpRenderer {
    client: Client,
    timeout_secs: u64,
}

impl HttpRenderer {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.page_timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs: config.page_timeout_secs,
        })
    }

    /// Rejects non-http(s) schemes and local/private hosts before any
    /// request is issued.
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }

        let Some(host) = parsed.host_str() else {
            return false;
        };

        if host.eq_ignore_ascii_case("localhost") {
            return false;
        }

        if let Ok(ip) = host.parse::<IpAddr>() {
            return match ip {
                IpAddr::V4(v4) => {
                    !(v4.is_loopback()
                        || v4.is_private()
                        || v4.is_link_local()
                        || v4.is_unspecified())
                }
                IpAddr::V6(v6) => !(v6.is_loopback() || v6.is_unspecified()),
            };
        }

        true
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> std::result::Result<String, FetchError> {
        if !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl);
        }

        debug!("Rendering page: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))
    }
}
