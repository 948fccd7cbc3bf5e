//! Configuration management for the twidash CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use twidash::{Credentials, Dashboard, DashboardConfig, TwitterClient};

/// CLI configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Platform credentials.
    pub credentials: Option<CredentialsConfig>,
    /// Display counts.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Credentials as stored in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl From<CredentialsConfig> for Credentials {
    fn from(c: CredentialsConfig) -> Self {
        Credentials::new(
            c.consumer_key,
            c.consumer_secret,
            c.access_token,
            c.access_token_secret,
        )
    }
}

/// How much of each list to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub friends: u32,
    pub posts: u32,
    pub messages: u32,
    /// Longest the status list may grow after posting; 0 means unbounded.
    pub post_cap: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let defaults = DashboardConfig::default();
        Self {
            friends: defaults.friends_count,
            posts: defaults.posts_count,
            messages: defaults.messages_count,
            post_cap: defaults.post_cap.unwrap_or(0),
        }
    }
}

impl From<&DisplayConfig> for DashboardConfig {
    fn from(d: &DisplayConfig) -> Self {
        DashboardConfig {
            friends_count: d.friends,
            posts_count: d.posts,
            messages_count: d.messages,
            post_cap: (d.post_cap > 0).then_some(d.post_cap),
        }
    }
}

/// Credential parts given on the command line or in the environment.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
}

impl CredentialOverrides {
    /// Layer overrides on top of stored credentials.
    pub fn apply(&self, stored: Option<CredentialsConfig>) -> Option<CredentialsConfig> {
        let has_any = self.consumer_key.is_some()
            || self.consumer_secret.is_some()
            || self.access_token.is_some()
            || self.access_token_secret.is_some();
        if stored.is_none() && !has_any {
            return None;
        }

        let mut creds = stored.unwrap_or_default();
        if let Some(v) = &self.consumer_key {
            creds.consumer_key = v.clone();
        }
        if let Some(v) = &self.consumer_secret {
            creds.consumer_secret = v.clone();
        }
        if let Some(v) = &self.access_token {
            creds.access_token = v.clone();
        }
        if let Some(v) = &self.access_token_secret {
            creds.access_token_secret = v.clone();
        }
        Some(creds)
    }
}

/// Get the configuration file path.
pub fn config_path() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.join("twidash.toml"))
}

/// Load configuration from file.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).context("Failed to read config file")?;

    toml::from_str(&content).context("Failed to parse config file")
}

/// Save configuration to file.
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content).context("Failed to write config file")?;

    Ok(())
}

/// Build a client that requires credentials.
pub fn build_authed_client(config: &Config, overrides: &CredentialOverrides) -> Result<TwitterClient> {
    let creds = overrides
        .apply(config.credentials.clone())
        .context("Credentials required. Run 'twidash auth login' first.")?;

    let mut builder = TwitterClient::builder().with_credentials(creds.into());
    if let Some(ref url) = config.base_url {
        builder = builder.base_url(url);
    }

    builder.build().context("Failed to build client")
}

/// Build a dashboard from the current configuration.
pub fn build_dashboard(overrides: &CredentialOverrides) -> Result<Dashboard<TwitterClient>> {
    let config = load_config()?;
    let client = build_authed_client(&config, overrides)?;
    Ok(Dashboard::new(Arc::new(client), (&config.display).into()))
}
