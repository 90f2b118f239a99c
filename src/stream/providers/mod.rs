//! Site-specific stream providers

pub mod globe_wien;

pub use globe_wien::GlobeWienProvider;
