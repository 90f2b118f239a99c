//! Stream extraction
//!
//! Providers turn a page URL into a [`StreamInfo`]; manifests are expanded
//! into [`StreamFormat`]s; all network reads go through an [`ExtractorHost`].

pub mod format;
pub mod host;
pub mod manifest;
pub mod provider;
pub mod providers;
pub mod router;

pub use format::{sort_formats, StreamFormat};
pub use host::ExtractorHost;
pub use provider::{StreamInfo, StreamProvider};
pub use router::ProviderRouter;
