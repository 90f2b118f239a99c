//! Client configuration loaded from `~/.config/globeplay/config.toml`.
//!
//! Every key is optional:
//!
//! ```toml
//! user_agent = "Mozilla/5.0 ..."
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! api_base = "https://player.globe.wien/api/playout"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ExtractError, Result};

/// Playout API shared by both player sites.
pub const DEFAULT_API_BASE: &str = "https://player.globe.wien/api/playout";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Base URL of the playout API; `?vodId=<id>` is appended.
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load the config from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load the config from an explicit path. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
            .map_err(|e| ExtractError::Config(format!("invalid TOML in {}: {e}", path.display())))
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Return the path to the config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("globeplay")
        .join("config.toml")
}
