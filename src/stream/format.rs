//! Playable format entries and their ordering.

use std::cmp::Ordering;

use serde::Serialize;
use url::Url;

/// One concrete, playable media variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamFormat {
    /// Identifier unique within one extraction (e.g., `"hls-2128"`).
    pub format_id: String,
    /// Media or media-playlist URL.
    pub url: String,
    /// Manifest the entry was expanded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
    /// File extension of the downloaded media.
    pub ext: String,
    /// Transfer protocol (`"https"`, `"m3u8_native"`, `"http_dash_segments"`).
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Total bitrate in kbit/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    /// Video codec; `"none"` marks an audio-only entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcodec: Option<String>,
    /// Audio codec; `"none"` marks a video-only entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acodec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl StreamFormat {
    #[must_use]
    pub fn is_audio_only(&self) -> bool {
        self.vcodec.as_deref() == Some("none")
    }

    /// Short `WIDTHxHEIGHT` / `audio only` label for listings.
    #[must_use]
    pub fn resolution(&self) -> String {
        match (self.width, self.height) {
            _ if self.is_audio_only() => "audio only".to_string(),
            (Some(w), Some(h)) => format!("{w}x{h}"),
            (None, Some(h)) => format!("{h}p"),
            _ => "unknown".to_string(),
        }
    }
}

/// Sort formats best-first.
///
/// Entries with video rank above audio-only ones, then by height, width,
/// bitrate, frame rate and protocol. `format_id` breaks remaining ties so
/// the order is fully deterministic.
pub fn sort_formats(formats: &mut [StreamFormat]) {
    formats.sort_by(|a, b| compare_quality(b, a));
}

fn compare_quality(a: &StreamFormat, b: &StreamFormat) -> Ordering {
    (!a.is_audio_only())
        .cmp(&!b.is_audio_only())
        .then_with(|| a.height.cmp(&b.height))
        .then_with(|| a.width.cmp(&b.width))
        .then_with(|| cmp_f64(a.tbr, b.tbr))
        .then_with(|| cmp_f64(a.fps, b.fps))
        .then_with(|| protocol_preference(&a.protocol).cmp(&protocol_preference(&b.protocol)))
        .then_with(|| b.format_id.cmp(&a.format_id))
}

fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn protocol_preference(protocol: &str) -> u8 {
    match protocol {
        "https" => 4,
        "http" => 3,
        "m3u8_native" | "m3u8" => 2,
        "http_dash_segments" => 1,
        _ => 0,
    }
}

const VIDEO_CODECS: &[&str] = &["avc1", "avc3", "hvc1", "hev1", "vp8", "vp9", "vp09", "av01", "h264", "h265"];
const AUDIO_CODECS: &[&str] = &["mp4a", "opus", "vorbis", "mp3", "ac-3", "ec-3", "flac", "alac", "dtsc"];

/// Split an RFC 6381 `CODECS` list into `(vcodec, acodec)`.
///
/// A codec list with only audio entries yields `vcodec = "none"` and vice versa.
#[must_use]
pub fn parse_codecs(codecs: &str) -> (Option<String>, Option<String>) {
    let mut vcodec = None;
    let mut acodec = None;

    for codec in codecs.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let family = codec.split('.').next().unwrap_or(codec).to_lowercase();
        if VIDEO_CODECS.contains(&family.as_str()) {
            vcodec.get_or_insert_with(|| codec.to_string());
        } else if AUDIO_CODECS.contains(&family.as_str()) {
            acodec.get_or_insert_with(|| codec.to_string());
        }
    }

    match (vcodec, acodec) {
        (None, None) => (None, None),
        (Some(v), None) => (Some(v), Some("none".to_string())),
        (None, Some(a)) => (Some("none".to_string()), Some(a)),
        (v, a) => (v, a),
    }
}

/// Extension of the last path segment, or `default` if it has none.
#[must_use]
pub fn determine_ext(url: &str, default: &str) -> String {
    let path = Url::parse(url).map_or_else(
        |_| url.split(['?', '#']).next().unwrap_or(url).to_string(),
        |u| u.path().to_string(),
    );

    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| default.to_string(), str::to_lowercase)
}

/// Transfer protocol implied by the URL scheme.
#[must_use]
pub fn determine_protocol(url: &str) -> String {
    Url::parse(url).map_or_else(|_| "https".to_string(), |u| u.scheme().to_string())
}
