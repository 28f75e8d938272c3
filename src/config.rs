//! Bot configuration loaded from `homework-watch.toml`.
//!
//! The [`BotConfig`] struct holds every tunable. Values missing from the file fall
//! back to defaults. The `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID`
//! credentials are taken from the environment first, then from a `.env` file in the
//! working directory, and only then from the TOML file.

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::BotError;
use crate::practicum::ENDPOINT;
use crate::telegram::API_URL;

pub const DEFAULT_CONFIG_PATH: &str = "homework-watch.toml";
pub const DOTENV_PATH: &str = ".env";

/// Top-level configuration loaded from `homework-watch.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// OAuth token for the Practicum API.
    #[serde(default)]
    pub practicum_token: String,

    /// Telegram bot token.
    #[serde(default)]
    pub telegram_token: String,

    /// Chat that receives notifications.
    #[serde(default)]
    pub telegram_chat_id: String,

    /// Homework status endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Telegram Bot API host.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    /// Seconds to sleep between polls.
    #[serde(default = "default_retry_time_secs")]
    pub retry_time_secs: u64,

    /// Per-request timeout for both HTTP clients.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    ENDPOINT.to_string()
}

fn default_telegram_api_url() -> String {
    API_URL.to_string()
}

// Ten minutes between polls.
fn default_retry_time_secs() -> u64 {
    600
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            practicum_token: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: String::new(),
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_time_secs: default_retry_time_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BotConfig {
    /// Loads `homework-watch.toml` from the working directory, or `path` when given,
    /// then applies `.env` and environment overrides. A missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        Self::load_from(path, Path::new(DOTENV_PATH), |name| std::env::var(name).ok())
    }

    /// Same as [`BotConfig::load`] with explicit paths and environment lookup.
    pub fn load_from(
        path: &Path,
        dotenv_path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<BotConfig>(&contents)?
        } else {
            Self::default()
        };

        // Real environment variables win over `.env`, as with `dotenvy::dotenv()`.
        let dotenv = read_dotenv(dotenv_path)?;
        config.apply_env(|name| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| dotenv.get(name).cloned())
        });
        Ok(config)
    }

    /// Overrides credentials with non-empty values returned by `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let slots = [
            ("PRACTICUM_TOKEN", &mut self.practicum_token),
            ("TELEGRAM_TOKEN", &mut self.telegram_token),
            ("TELEGRAM_CHAT_ID", &mut self.telegram_chat_id),
        ];
        for (name, slot) in slots {
            if let Some(value) = lookup(name)
                && !value.trim().is_empty()
            {
                *slot = value;
            }
        }
    }

    /// Fails with [`BotError::MissingCredential`] naming every empty credential.
    pub fn check_credentials(&self) -> Result<(), BotError> {
        let names: Vec<String> = [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

        if names.is_empty() {
            Ok(())
        } else {
            Err(BotError::MissingCredential { names })
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.retry_time_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Printable summary with secrets masked.
    pub fn describe(&self) -> String {
        format!(
            "endpoint = {}\ntelegram_api_url = {}\nretry_time_secs = {}\nrequest_timeout_secs = {}\n\
             PRACTICUM_TOKEN = {}\nTELEGRAM_TOKEN = {}\nTELEGRAM_CHAT_ID = {}",
            self.endpoint,
            self.telegram_api_url,
            self.retry_time_secs,
            self.request_timeout_secs,
            mask(&self.practicum_token),
            mask(&self.telegram_token),
            mask(&self.telegram_chat_id),
        )
    }
}

/// Reads `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing file yields no pairs.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let pairs = dotenvy::from_path_iter(path)?.collect::<Result<HashMap<_, _>, _>>()?;
    Ok(pairs)
}

fn mask(secret: &str) -> String {
    match secret.chars().count() {
        0 => "<missing>".to_string(),
        n if n <= 4 => "****".to_string(),
        n => {
            let tail: String = secret.chars().skip(n - 4).collect();
            format!("****{tail}")
        }
    }
}
