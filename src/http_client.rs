//! HTTP client backing [`ExtractorHost`].
//!
//! Features:
//! - HTTP/2 with fallback to HTTP/1.1
//! - TLS 1.3 via rustls
//! - Brotli, Zstd, Gzip, Deflate compression (auto-negotiated)
//! - Connection pooling with keep-alive
//! - Cookie store shared across the page, API and manifest requests

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::{ExtractError, Result};
use crate::stream::host::ExtractorHost;

/// reqwest-backed HTTP client.
pub struct HttpHost {
    client: Client,
}

impl HttpHost {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Create a client honouring timeouts and User-Agent from `config`.
    pub fn with_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            // Let the server negotiate HTTP/2
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a URL, failing on non-success status codes.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<Response> {
        debug!("Fetching");
        let response = self.client.get(url).send().await?;

        info!(
            status = %response.status(),
            version = ?response.version(),
            content_encoding = ?response.headers().get("content-encoding"),
            "Response received"
        );

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ExtractorHost for HttpHost {
    async fn fetch_webpage(&self, url: &str, video_id: &str, note: &str) -> Result<String> {
        info!("[{video_id}] {note}");
        let response = self.fetch(url).await?;
        Ok(response.text().await?)
    }
}
