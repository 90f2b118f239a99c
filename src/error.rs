//! Extraction errors.

use thiserror::Error;

/// Errors raised while turning a page URL into stream information.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to extract {0}")]
    FieldNotFound(&'static str),

    #[error("Failed to parse {kind} manifest {url}: {reason}")]
    Manifest {
        kind: &'static str,
        url: String,
        reason: String,
    },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
