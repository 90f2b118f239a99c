//! DASH MPD expansion.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{join_id, resolve_url};
use crate::error::{ExtractError, Result};
use crate::stream::format::StreamFormat;
use crate::stream::host::ExtractorHost;

/// Download `mpd_url` and expand every representation into a format whose
/// id starts with `mpd_id`.
pub async fn extract_mpd_formats(
    host: &dyn ExtractorHost,
    mpd_url: &str,
    video_id: &str,
    mpd_id: &str,
) -> Result<Vec<StreamFormat>> {
    let content = host
        .fetch_webpage(mpd_url, video_id, "Downloading MPD manifest")
        .await?;
    parse_mpd_formats(&content, mpd_url, mpd_id)
}

/// Expand an already-downloaded MPD document.
pub fn parse_mpd_formats(content: &str, mpd_url: &str, mpd_id: &str) -> Result<Vec<StreamFormat>> {
    let manifest_error = |reason: String| ExtractError::Manifest {
        kind: "DASH",
        url: mpd_url.to_string(),
        reason,
    };

    let base = Url::parse(mpd_url).map_err(|e| manifest_error(e.to_string()))?;
    let mpd: Mpd = quick_xml::de::from_str(content).map_err(|e| manifest_error(e.to_string()))?;

    let mpd_base = rebase(&base, &mpd.base_urls);
    let mut formats = Vec::new();

    for period in &mpd.periods {
        let period_base = rebase(&mpd_base, &period.base_urls);

        for set in &period.adaptation_sets {
            let set_base = rebase(&period_base, &set.base_urls);

            for rep in &set.representations {
                let index = formats.len();
                if let Some(format) =
                    representation_format(set, rep, &set_base, mpd_url, mpd_id, index)
                {
                    formats.push(format);
                }
            }
        }
    }

    debug!("Expanded {} DASH formats from {mpd_url}", formats.len());
    Ok(formats)
}

fn representation_format(
    set: &AdaptationSet,
    rep: &Representation,
    set_base: &Url,
    mpd_url: &str,
    mpd_id: &str,
    index: usize,
) -> Option<StreamFormat> {
    let mime_type = rep.mime_type.as_deref().or(set.mime_type.as_deref()).unwrap_or_default();
    let content_type = set
        .content_type
        .as_deref()
        .or_else(|| mime_type.split('/').next())
        .unwrap_or_default();

    let is_video = content_type == "video";
    let is_audio = content_type == "audio";
    if !is_video && !is_audio {
        return None;
    }

    let codecs = rep.codecs.clone().or_else(|| set.codecs.clone());
    let (vcodec, acodec) = if is_video {
        (codecs, Some("none".to_string()))
    } else {
        (Some("none".to_string()), codecs)
    };

    let url = rep.base_urls.first().map_or_else(
        || mpd_url.to_string(),
        |b| resolve_url(set_base, b.value.trim()),
    );

    let id = rep.id.clone().unwrap_or_else(|| index.to_string());

    Some(StreamFormat {
        format_id: join_id(&[mpd_id, &id]),
        url,
        manifest_url: Some(mpd_url.to_string()),
        ext: mimetype_ext(mime_type).to_string(),
        protocol: "http_dash_segments".to_string(),
        width: rep.width,
        height: rep.height,
        tbr: rep.bandwidth.map(bandwidth_kbps),
        fps: rep.frame_rate.as_deref().or(set.frame_rate.as_deref()).and_then(parse_frame_rate),
        vcodec,
        acodec,
        format_note: Some("DASH".to_string()),
        language: set.lang.clone(),
    })
}

/// Resolve against the first `BaseURL`; further entries are alternates.
fn rebase(base: &Url, base_urls: &[BaseUrl]) -> Url {
    base_urls
        .first()
        .and_then(|b| base.join(b.value.trim()).ok())
        .unwrap_or_else(|| base.clone())
}

fn mimetype_ext(mime_type: &str) -> &'static str {
    match mime_type {
        "audio/mp4" => "m4a",
        "audio/webm" => "weba",
        "video/webm" => "webm",
        "audio/mpeg" => "mp3",
        _ => "mp4",
    }
}

#[allow(clippy::cast_precision_loss)]
fn bandwidth_kbps(bandwidth: u64) -> f64 {
    (bandwidth as f64 / 1000.0).round()
}

/// `"25"` or `"30000/1001"`.
fn parse_frame_rate(value: &str) -> Option<f64> {
    match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            (den != 0.0).then(|| num / den)
        }
        None => value.trim().parse().ok(),
    }
}

// Serde structures for the MPD document

#[derive(Debug, Deserialize)]
struct Mpd {
    #[serde(rename = "BaseURL", default)]
    base_urls: Vec<BaseUrl>,
    #[serde(rename = "Period", default)]
    periods: Vec<Period>,
}

#[derive(Debug, Deserialize)]
struct Period {
    #[serde(rename = "BaseURL", default)]
    base_urls: Vec<BaseUrl>,
    #[serde(rename = "AdaptationSet", default)]
    adaptation_sets: Vec<AdaptationSet>,
}

#[derive(Debug, Deserialize)]
struct AdaptationSet {
    #[serde(rename = "@contentType")]
    content_type: Option<String>,
    #[serde(rename = "@mimeType")]
    mime_type: Option<String>,
    #[serde(rename = "@codecs")]
    codecs: Option<String>,
    #[serde(rename = "@frameRate")]
    frame_rate: Option<String>,
    #[serde(rename = "@lang")]
    lang: Option<String>,
    #[serde(rename = "BaseURL", default)]
    base_urls: Vec<BaseUrl>,
    #[serde(rename = "Representation", default)]
    representations: Vec<Representation>,
}

#[derive(Debug, Deserialize)]
struct Representation {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@bandwidth")]
    bandwidth: Option<u64>,
    #[serde(rename = "@width")]
    width: Option<u32>,
    #[serde(rename = "@height")]
    height: Option<u32>,
    #[serde(rename = "@frameRate")]
    frame_rate: Option<String>,
    #[serde(rename = "@mimeType")]
    mime_type: Option<String>,
    #[serde(rename = "@codecs")]
    codecs: Option<String>,
    #[serde(rename = "BaseURL", default)]
    base_urls: Vec<BaseUrl>,
}

#[derive(Debug, Deserialize)]
struct BaseUrl {
    #[serde(rename = "$text")]
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::host::testing::FixtureHost;

    const URL: &str = "https://cdn.example.com/vod/stream.mpd";

    const MPD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" mediaPresentationDuration="PT1H2M3S">
  <Period id="0">
    <AdaptationSet contentType="video" mimeType="video/mp4" frameRate="25">
      <SegmentTemplate media="$RepresentationID$/$Number$.m4s" initialization="$RepresentationID$/init.mp4"/>
      <Representation id="v1080" bandwidth="4500000" width="1920" height="1080" codecs="avc1.640028"/>
      <Representation id="v720" bandwidth="2500000" width="1280" height="720" codecs="avc1.64001f"/>
    </AdaptationSet>
    <AdaptationSet contentType="audio" mimeType="audio/mp4" lang="de">
      <Representation id="a128" bandwidth="128000" codecs="mp4a.40.2">
        <BaseURL>audio/a128.mp4</BaseURL>
      </Representation>
    </AdaptationSet>
    <AdaptationSet contentType="text" mimeType="text/vtt" lang="de">
      <Representation id="sub" bandwidth="100"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

    #[test]
    fn test_video_representations() {
        let formats = parse_mpd_formats(MPD, URL, "dash").unwrap();
        let ids: Vec<_> = formats.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(ids, ["dash-v1080", "dash-v720", "dash-a128"]);

        let hd = &formats[0];
        assert_eq!(hd.url, URL);
        assert_eq!(hd.manifest_url.as_deref(), Some(URL));
        assert_eq!(hd.height, Some(1080));
        assert_eq!(hd.tbr, Some(4500.0));
        assert_eq!(hd.fps, Some(25.0));
        assert_eq!(hd.vcodec.as_deref(), Some("avc1.640028"));
        assert_eq!(hd.acodec.as_deref(), Some("none"));
        assert_eq!(hd.ext, "mp4");
        assert_eq!(hd.protocol, "http_dash_segments");
    }

    #[test]
    fn test_audio_representation_with_base_url() {
        let formats = parse_mpd_formats(MPD, URL, "dash").unwrap();
        let audio = &formats[2];
        assert!(audio.is_audio_only());
        assert_eq!(audio.acodec.as_deref(), Some("mp4a.40.2"));
        assert_eq!(audio.ext, "m4a");
        assert_eq!(audio.language.as_deref(), Some("de"));
        assert_eq!(audio.url, "https://cdn.example.com/vod/audio/a128.mp4");
    }

    #[test]
    fn test_nested_base_urls() {
        let mpd = r#"<MPD>
  <BaseURL>https://media.example.org/root/</BaseURL>
  <Period>
    <BaseURL>p1/</BaseURL>
    <AdaptationSet mimeType="audio/mp4">
      <Representation id="a" bandwidth="96000"><BaseURL>a.m4a</BaseURL></Representation>
    </AdaptationSet>
  </Period>
</MPD>"#;
        let formats = parse_mpd_formats(mpd, URL, "dash").unwrap();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].url, "https://media.example.org/root/p1/a.m4a");
        assert!(formats[0].is_audio_only());
    }

    #[test]
    fn test_repeated_base_urls_use_first() {
        let mpd = r#"<MPD>
  <BaseURL>https://cdn1.example.org/vod/</BaseURL>
  <BaseURL>https://cdn2.example.org/vod/</BaseURL>
  <Period>
    <AdaptationSet mimeType="video/mp4">
      <Representation id="v" bandwidth="1000000" height="540">
        <BaseURL>v.mp4</BaseURL>
        <BaseURL>https://backup.example.org/v.mp4</BaseURL>
      </Representation>
    </AdaptationSet>
  </Period>
</MPD>"#;
        let formats = parse_mpd_formats(mpd, URL, "dash").unwrap();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].url, "https://cdn1.example.org/vod/v.mp4");
    }

    #[test]
    fn test_invalid_mpd() {
        let mpd = r#"<MPD><Period><AdaptationSet contentType="video">
<Representation id="v" bandwidth="lots"/>
</AdaptationSet></Period></MPD>"#;
        let err = parse_mpd_formats(mpd, URL, "dash").unwrap_err();
        assert!(matches!(err, ExtractError::Manifest { kind: "DASH", .. }));
    }

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert_eq!(parse_frame_rate("50/2"), Some(25.0));
        assert_eq!(parse_frame_rate("1/0"), None);
        assert_eq!(parse_frame_rate("fast"), None);
    }

    #[tokio::test]
    async fn test_extract_fetches_through_host() {
        let host = FixtureHost::new().with_page(URL, MPD);
        let formats = extract_mpd_formats(&host, URL, "vod", "dash").await.unwrap();
        assert_eq!(formats.len(), 3);
        assert_eq!(host.requested(), vec![URL.to_string()]);
    }
}
