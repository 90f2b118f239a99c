//! Manifest expansion: turn an HLS or DASH manifest URL into formats.

pub mod dash;
pub mod hls;

use url::Url;

pub use dash::extract_mpd_formats;
pub use hls::extract_m3u8_formats;

/// Resolve `reference` against `base`, keeping it verbatim if it can't be joined.
fn resolve_url(base: &Url, reference: &str) -> String {
    base.join(reference)
        .map_or_else(|_| reference.to_string(), |u| u.to_string())
}

/// Join non-empty id parts with `-`.
fn join_id(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/master.m3u8").unwrap();
        assert_eq!(resolve_url(&base, "video.m3u8"), "https://example.com/path/video.m3u8");
        assert_eq!(resolve_url(&base, "/video.m3u8"), "https://example.com/video.m3u8");
        assert_eq!(
            resolve_url(&base, "https://cdn.example.com/video.m3u8"),
            "https://cdn.example.com/video.m3u8"
        );
    }

    #[test]
    fn test_join_id_skips_empty_parts() {
        assert_eq!(join_id(&["hls", "", "720"]), "hls-720");
        assert_eq!(join_id(&["", "a"]), "a");
    }
}
