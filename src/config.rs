use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://static.leboncoin.fr/img/";
const DEFAULT_ENDPOINT: &str = "shared/technical-test.json";
const DEFAULT_USER_AGENT: &str = "LeboncoinApp/1.0";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub storage: StorageConfig,
  #[serde(default)]
  pub watch: WatchConfig,
  /// Default tracing filter, overridden by RUST_LOG and --log-level
  pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub base_url: String,
  /// Path of the album feed, relative to `base_url`
  pub endpoint: String,
  pub user_agent: String,
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      endpoint: DEFAULT_ENDPOINT.to_string(),
      user_agent: DEFAULT_USER_AGENT.to_string(),
      timeout_secs: 30,
    }
  }
}

impl ApiConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// Full feed address: `endpoint` joined onto `base_url`, treating the base
  /// as a directory.
  pub fn feed_url(&self) -> Result<Url> {
    let mut base = Url::parse(&self.base_url)
      .map_err(|e| eyre!("Invalid API base URL {}: {}", self.base_url, e))?;

    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }

    base
      .join(self.endpoint.trim_start_matches('/'))
      .map_err(|e| eyre!("Invalid album endpoint {}: {}", self.endpoint, e))
  }

  /// host:port of the feed, for reachability checks.
  pub fn feed_addr(&self) -> Result<String> {
    let url = self.feed_url()?;
    let host = url
      .host_str()
      .ok_or_else(|| eyre!("Album feed URL has no host: {}", url))?;
    let port = url
      .port_or_known_default()
      .ok_or_else(|| eyre!("Album feed URL has no port: {}", url))?;
    Ok(format!("{}:{}", host, port))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
  /// Database file (defaults to $XDG_DATA_HOME/albums/albums.db)
  pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
  /// Quiet period after reconnecting before a refresh fires
  pub debounce_ms: u64,
  pub probe_interval_secs: u64,
}

impl Default for WatchConfig {
  fn default() -> Self {
    Self {
      debounce_ms: 1000,
      probe_interval_secs: 5,
    }
  }
}

impl WatchConfig {
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }

  pub fn probe_interval(&self) -> Duration {
    Duration::from_secs(self.probe_interval_secs.max(1))
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided (must exist)
  /// 2. ./albums.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/albums/config.yaml
  ///
  /// Falls back to defaults when no file is found. `ALBUMS_API_URL`
  /// overrides the API base URL in every case.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Self::default(),
    };

    if let Some(url) = Self::api_url_override() {
      config.api.base_url = url;
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("albums.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("albums").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file deserializes to unit, not to an empty mapping
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  /// API base URL from the environment, if set.
  fn api_url_override() -> Option<String> {
    std::env::var("ALBUMS_API_URL")
      .ok()
      .filter(|s| !s.trim().is_empty())
  }
}
