//! HLS playlist expansion.
//!
//! A master playlist becomes one [`StreamFormat`] per variant plus one per
//! alternative audio/video rendition carrying its own URI. A media playlist
//! becomes a single entry pointing at the playlist itself.

use m3u8_rs::{AlternativeMedia, AlternativeMediaType, MasterPlaylist, Playlist, VariantStream};
use tracing::debug;
use url::Url;

use super::{join_id, resolve_url};
use crate::error::{ExtractError, Result};
use crate::stream::format::{parse_codecs, StreamFormat};
use crate::stream::host::ExtractorHost;

/// Download `m3u8_url` and expand it into formats whose ids start with `m3u8_id`.
pub async fn extract_m3u8_formats(
    host: &dyn ExtractorHost,
    m3u8_url: &str,
    video_id: &str,
    ext: &str,
    protocol: &str,
    m3u8_id: &str,
) -> Result<Vec<StreamFormat>> {
    let content = host
        .fetch_webpage(m3u8_url, video_id, "Downloading m3u8 information")
        .await?;
    parse_m3u8_formats(&content, m3u8_url, ext, protocol, m3u8_id)
}

/// Expand an already-downloaded playlist.
pub fn parse_m3u8_formats(
    content: &str,
    m3u8_url: &str,
    ext: &str,
    protocol: &str,
    m3u8_id: &str,
) -> Result<Vec<StreamFormat>> {
    let manifest_error = |reason: String| ExtractError::Manifest {
        kind: "HLS",
        url: m3u8_url.to_string(),
        reason,
    };

    let base = Url::parse(m3u8_url).map_err(|e| manifest_error(e.to_string()))?;
    let playlist = m3u8_rs::parse_playlist_res(content.as_bytes())
        .map_err(|_| manifest_error("not a valid M3U8 playlist".to_string()))?;

    let template = StreamFormat {
        manifest_url: Some(m3u8_url.to_string()),
        ext: ext.to_string(),
        protocol: protocol.to_string(),
        ..Default::default()
    };

    let formats = match playlist {
        Playlist::MediaPlaylist(_) => vec![StreamFormat {
            format_id: m3u8_id.to_string(),
            url: m3u8_url.to_string(),
            ..template
        }],
        Playlist::MasterPlaylist(master) => expand_master(&master, &base, &template, m3u8_id),
    };

    debug!("Expanded {} HLS formats from {m3u8_url}", formats.len());
    Ok(formats)
}

fn expand_master(
    master: &MasterPlaylist,
    base: &Url,
    template: &StreamFormat,
    m3u8_id: &str,
) -> Vec<StreamFormat> {
    let renditions = master
        .alternatives
        .iter()
        .filter_map(|media| rendition_format(media, base, template, m3u8_id));

    let variants = master
        .variants
        .iter()
        .filter(|v| !v.is_i_frame)
        .enumerate()
        .map(|(index, variant)| variant_format(variant, index, base, template, m3u8_id));

    renditions.chain(variants).collect()
}

fn rendition_format(
    media: &AlternativeMedia,
    base: &Url,
    template: &StreamFormat,
    m3u8_id: &str,
) -> Option<StreamFormat> {
    let is_audio = match media.media_type {
        AlternativeMediaType::Audio => true,
        AlternativeMediaType::Video => false,
        _ => return None,
    };
    let uri = media.uri.as_deref()?;

    Some(StreamFormat {
        format_id: join_id(&[m3u8_id, &media.group_id, &media.name]),
        url: resolve_url(base, uri),
        vcodec: is_audio.then(|| "none".to_string()),
        format_note: Some(media.name.clone()),
        language: media.language.clone(),
        ..template.clone()
    })
}

fn variant_format(
    variant: &VariantStream,
    index: usize,
    base: &Url,
    template: &StreamFormat,
    m3u8_id: &str,
) -> StreamFormat {
    let tbr = bandwidth_kbps(variant.average_bandwidth.unwrap_or(variant.bandwidth));
    let suffix = tbr.map_or_else(|| index.to_string(), |t| format!("{t:.0}"));

    let (mut vcodec, acodec) = variant
        .codecs
        .as_deref()
        .map_or((None, None), parse_codecs);
    // A variant with a resolution is video even when CODECS lists audio only.
    if variant.resolution.is_some() && vcodec.as_deref() == Some("none") {
        vcodec = None;
    }

    StreamFormat {
        format_id: join_id(&[m3u8_id, &suffix]),
        url: resolve_url(base, &variant.uri),
        width: variant.resolution.as_ref().and_then(|r| u32::try_from(r.width).ok()),
        height: variant.resolution.as_ref().and_then(|r| u32::try_from(r.height).ok()),
        tbr,
        fps: variant.frame_rate,
        vcodec,
        acodec,
        ..template.clone()
    }
}

#[allow(clippy::cast_precision_loss)]
fn bandwidth_kbps(bandwidth: u64) -> Option<f64> {
    (bandwidth > 0).then(|| (bandwidth as f64 / 1000.0).round())
}
