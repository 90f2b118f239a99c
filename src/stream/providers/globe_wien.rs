//! Globe Wien / Hader VOD player provider
//!
//! Both `player.globe.wien` and `player.hader.at` serve the same player and
//! share one playout API on `player.globe.wien`. The page carries the
//! metadata (OpenGraph), the API carries the stream URLs.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::DEFAULT_API_BASE;
use crate::error::{ExtractError, Result};
use crate::html::{og_search_description, og_search_thumbnail, og_search_title, search_regex};
use crate::stream::format::{determine_ext, determine_protocol, sort_formats, StreamFormat};
use crate::stream::host::ExtractorHost;
use crate::stream::manifest::{extract_m3u8_formats, extract_mpd_formats};
use crate::stream::provider::{StreamInfo, StreamProvider};

static VALID_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://player\.(?:globe\.wien|hader\.at)/(?:globe-wien|hader)/(?P<id>[^?#]+)")
        .unwrap()
});

static THUMBNAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img class="(?:.+?)" src="(?P<thumbnail>.+?)""#).unwrap());

static TITLE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Globe Wien VOD -|Hader VOD -)\s*").unwrap());

/// A page known to exist on one of the two sites, with the metadata it
/// is expected to yield. Used by the network tests.
#[derive(Debug, Clone, Copy)]
pub struct ProviderTestCase {
    pub url: &'static str,
    pub id: &'static str,
    pub ext: &'static str,
    pub title: &'static str,
    /// `true` when the page only offers audio.
    pub audio_only: bool,
}

const TEST_CASES: &[ProviderTestCase] = &[
    ProviderTestCase {
        url: "https://player.globe.wien/globe-wien/corona-podcast-teil-4",
        id: "corona-podcast-teil-4",
        ext: "mp4",
        title: "Eckel & Niavarani & Sarsam - Im Endspurt versagt",
        audio_only: false,
    },
    ProviderTestCase {
        url: "https://player.hader.at/hader/hader-indien-video",
        id: "hader-indien-video",
        ext: "mp4",
        title: "Film der Woche - Indien",
        audio_only: false,
    },
    ProviderTestCase {
        url: "https://player.hader.at/hader/hader-indien",
        id: "hader-indien",
        ext: "mp3",
        title: "Hader & Dorfer lesen Indien",
        audio_only: true,
    },
];

pub struct GlobeWienProvider {
    api_base: String,
}

impl GlobeWienProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Use a different playout API endpoint.
    #[must_use]
    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
        }
    }

    #[must_use]
    pub fn test_cases() -> &'static [ProviderTestCase] {
        TEST_CASES
    }

    /// Extract the asset ID from a player URL.
    pub fn extract_video_id(url: &str) -> Result<String> {
        VALID_URL
            .captures(url)
            .and_then(|caps| caps.name("id"))
            .map(|m| m.as_str().trim_end_matches('/'))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ExtractError::UnsupportedUrl(url.to_string()))
    }

    /// Strip the `"Globe Wien VOD - "` / `"Hader VOD - "` site prefix.
    #[must_use]
    pub fn clean_title(title: &str) -> String {
        TITLE_PREFIX_RE.replace(title, "").into_owned()
    }

    /// The id is appended as captured from the page URL. It is already in
    /// URL form, so re-encoding it would double-escape any `%`.
    fn playout_url(&self, video_id: &str) -> Result<String> {
        Url::parse(&self.api_base)
            .map_err(|e| ExtractError::Config(format!("invalid api_base {}: {e}", self.api_base)))?;
        Ok(format!("{}?vodId={video_id}", self.api_base))
    }

    async fn fetch_stream_urls(&self, host: &dyn ExtractorHost, video_id: &str) -> Result<StreamUrls> {
        let url = self.playout_url(video_id)?;
        let value = host
            .fetch_json(&url, video_id, "Downloading playout JSON")
            .await?;

        let playout: PlayoutResponse =
            serde_json::from_value(value).map_err(|source| ExtractError::Json {
                url: url.clone(),
                source,
            })?;

        playout
            .stream_url
            .ok_or(ExtractError::FieldNotFound("streamUrl"))
    }

    async fn collect_formats(
        host: &dyn ExtractorHost,
        streams: &StreamUrls,
        video_id: &str,
    ) -> Result<Vec<StreamFormat>> {
        let mut formats = Vec::new();

        if let Some(hls) = non_empty(streams.hls.as_deref()) {
            formats.extend(extract_m3u8_formats(host, hls, video_id, "mp4", "m3u8_native", "hls").await?);
        }

        if let Some(dash) = non_empty(streams.dash.as_deref()) {
            match extract_mpd_formats(host, dash, video_id, "dash").await {
                Ok(dash_formats) => formats.extend(dash_formats),
                Err(e) => warn!("{video_id}: skipping DASH formats: {e}"),
            }
        }

        if let Some(audio) = non_empty(streams.audio.as_deref()) {
            formats.push(StreamFormat {
                format_id: video_id.to_string(),
                url: audio.to_string(),
                ext: determine_ext(audio, "mp3"),
                protocol: determine_protocol(audio),
                vcodec: Some("none".to_string()),
                ..Default::default()
            });
        }

        sort_formats(&mut formats);
        Ok(formats)
    }
}

impl Default for GlobeWienProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamProvider for GlobeWienProvider {
    fn name(&self) -> &'static str {
        "PlayerGlobeWien"
    }

    fn matches(&self, url: &str) -> bool {
        VALID_URL.is_match(url)
    }

    async fn extract(&self, url: &str, host: &dyn ExtractorHost) -> Result<StreamInfo> {
        let video_id = Self::extract_video_id(url)?;
        debug!("Extracting {video_id} from {url}");

        let webpage = host
            .fetch_webpage(url, &video_id, "Downloading webpage")
            .await?;

        let thumbnail_url = search_regex(&THUMBNAIL_RE, &webpage, "thumbnail")
            .or_else(|| og_search_thumbnail(&webpage));
        let description = og_search_description(&webpage);
        let title = og_search_title(&webpage)
            .map(|t| Self::clean_title(&t))
            .ok_or(ExtractError::FieldNotFound("OpenGraph title"))?;

        let streams = self.fetch_stream_urls(host, &video_id).await?;
        let formats = Self::collect_formats(host, &streams, &video_id).await?;
        debug!("{video_id}: {} formats", formats.len());

        Ok(StreamInfo {
            id: video_id,
            title,
            description,
            thumbnail_url,
            formats,
            extractor: self.name(),
            webpage_url: url.to_string(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// Serde structures for the playout API response

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayoutResponse {
    stream_url: Option<StreamUrls>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamUrls {
    hls: Option<String>,
    dash: Option<String>,
    audio: Option<String>,
}
