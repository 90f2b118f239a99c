//! Stream provider trait and common types.
//!
//! A [`StreamProvider`] knows how to turn a page URL on one specific site
//! into a [`StreamInfo`]: metadata plus every playable format the site
//! exposes for that page.

use async_trait::async_trait;
use serde::Serialize;

use super::format::StreamFormat;
use super::host::ExtractorHost;
use crate::error::Result;

/// Metadata and formats for a single video or audio asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamInfo {
    /// Provider-specific asset ID.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// URL for a representative thumbnail image.
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Option<String>,
    /// Playable formats, best first. May be empty.
    pub formats: Vec<StreamFormat>,
    /// Name of the provider that produced this result.
    pub extractor: &'static str,
    /// The page URL extraction started from.
    pub webpage_url: String,
}

impl StreamInfo {
    /// The best format, if any.
    #[must_use]
    pub fn best_format(&self) -> Option<&StreamFormat> {
        self.formats.first()
    }

    /// `true` if no format carries video.
    #[must_use]
    pub fn is_audio_only(&self) -> bool {
        self.formats.iter().all(StreamFormat::is_audio_only)
    }
}

/// Trait for site-specific stream providers.
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Short provider name (e.g., `"PlayerGlobeWien"`).
    fn name(&self) -> &'static str;

    /// Returns `true` if this provider can handle the given URL.
    fn matches(&self, url: &str) -> bool;

    /// Extract stream metadata for `url`, reading the network through `host`.
    async fn extract(&self, url: &str, host: &dyn ExtractorHost) -> Result<StreamInfo>;
}
