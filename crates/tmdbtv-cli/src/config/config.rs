//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tmdbtv_api::tmdb::MetaPool;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// `[tmdb]` table: meta pool defaults and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbConfig {
    /// v3 API key (`api_key` query parameter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token, sent as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Default response language (e.g. `en-US`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// User session ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Guest session ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_session_id: Option<String>,
    /// Default image language filter (e.g. `en,null`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_image_language: Option<String>,
    /// Base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl TmdbConfig {
    /// Applies environment overrides (`TMDB_API_KEY`, `TMDB_API_TOKEN`).
    #[must_use]
    pub fn with_env_overrides(mut self, api_key: Option<String>, token: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.bearer_token = Some(token);
        }
        self
    }

    /// Builds the meta pool handed to the TV client.
    #[must_use]
    pub fn to_meta_pool(&self) -> MetaPool {
        MetaPool {
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            session_id: self.session_id.clone(),
            guest_session_id: self.guest_session_id.clone(),
            page: None,
            include_image_language: self.include_image_language.clone(),
        }
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Masks a secret for display, keeping the last four characters.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return String::from("****");
    }
    let tail: String = secret.chars().skip(count.saturating_sub(4)).collect();
    format!("****{tail}")
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
