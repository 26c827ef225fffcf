//! Client configuration loaded from a TOML file.
//!
//! Every field has a default, so a missing file (or a file with only some
//! sections) is a valid configuration.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "spotify-client.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spotify.com/v1/".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub session_file: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: "492e1e45ea814fa3ac555fe1576aaf5b".to_string(),
            redirect_uri: "http://127.0.0.1:8898/login".to_string(),
            scopes: [
                "user-read-private",
                "user-follow-read",
                "user-library-read",
                "playlist-read-private",
                "playlist-read-collaborative",
                "user-read-playback-state",
                "user-modify-playback-state",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            session_file: PathBuf::from(".cache/session.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
    /// Used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".logs"),
            file_prefix: "spotify-client".to_string(),
            filter: "spotify_client=debug,librespot_oauth=info,warn".to_string(),
        }
    }
}
