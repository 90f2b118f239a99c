//! `globeplay` - stream extractor for the Globe Wien and Hader VOD players
//!
//! Given a `player.globe.wien` or `player.hader.at` page URL, fetches the
//! page and the shared playout API and returns every playable HLS, DASH or
//! direct-audio format plus title, description and thumbnail.
//!
//! # Example
//!
//! ```rust,no_run
//! use globeplay::{HttpHost, ProviderRouter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let host = HttpHost::new()?;
//!     let router = ProviderRouter::new();
//!     let info = router
//!         .extract("https://player.hader.at/hader/hader-indien", &host)
//!         .await?;
//!     println!("{}: {} formats", info.title, info.formats.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod html;
pub mod http_client;
pub mod stream;

pub use config::Config;
pub use error::{ExtractError, Result};
pub use http_client::HttpHost;
pub use stream::{
    ExtractorHost, ProviderRouter, StreamFormat, StreamInfo, StreamProvider,
};

/// Version of globeplay
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
