//! Network capabilities handed to providers.
//!
//! Providers never own an HTTP client. They receive an [`ExtractorHost`]
//! and do every read through it, which keeps extraction logic testable
//! against canned responses.

use async_trait::async_trait;

use crate::error::{ExtractError, Result};

#[async_trait]
pub trait ExtractorHost: Send + Sync {
    /// Fetch `url` and return the body as text.
    ///
    /// `video_id` and `note` only label log output.
    async fn fetch_webpage(&self, url: &str, video_id: &str, note: &str) -> Result<String>;

    /// Fetch `url` and decode the body as JSON.
    async fn fetch_json(&self, url: &str, video_id: &str, note: &str) -> Result<serde_json::Value> {
        let body = self.fetch_webpage(url, video_id, note).await?;
        serde_json::from_str(&body).map_err(|source| ExtractError::Json {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixture-serving host for offline tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::{async_trait, ExtractError, ExtractorHost, Result};

    #[derive(Default)]
    pub struct FixtureHost {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FixtureHost {
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        /// URLs requested so far, in order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExtractorHost for FixtureHost {
        async fn fetch_webpage(&self, url: &str, _video_id: &str, _note: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ExtractError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    #[tokio::test]
    async fn test_fetch_json_default_decodes() {
        let host = FixtureHost::new().with_page("https://api.example.com/a", r#"{"ok": true}"#);
        let value = host
            .fetch_json("https://api.example.com/a", "a", "Downloading JSON")
            .await
            .unwrap();
        assert_eq!(value["ok"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn test_fetch_json_reports_malformed_body() {
        let host = FixtureHost::new().with_page("https://api.example.com/a", "<html>");
        let err = host
            .fetch_json("https://api.example.com/a", "a", "Downloading JSON")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Json { .. }));
    }
}
