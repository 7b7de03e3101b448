use serde::{Deserialize, Serialize};

use crate::scroll::ScrollPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_IDENTITY_KEY: &str = "channel-messages:user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    #[serde(default = "default_identity_key")]
    pub identity_key: String,
    #[serde(default)]
    pub scroll_policy: ScrollPolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_identity_key() -> String {
    DEFAULT_IDENTITY_KEY.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            identity_key: default_identity_key(),
            scroll_policy: ScrollPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Configuration baked in at build time (`trunk build` sees the shell
    /// environment), with defaults for anything unset.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CHANNEL_API_URL"),
            option_env!("CHANNEL_IDENTITY_KEY"),
            option_env!("CHANNEL_SCROLL_POLICY"),
            option_env!("CHANNEL_LOG_LEVEL"),
        )
    }

    fn from_values(
        api_base_url: Option<&str>,
        identity_key: Option<&str>,
        scroll_policy: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_base_url.filter(|url| !url.is_empty()) {
            config.api_base_url = url.to_owned();
        }
        if let Some(key) = identity_key.filter(|key| !key.is_empty()) {
            config.identity_key = key.to_owned();
        }
        if let Some(policy) = scroll_policy {
            match policy.parse() {
                Ok(policy) => config.scroll_policy = policy,
                Err(err) => log::warn!("Ignoring CHANNEL_SCROLL_POLICY: {err}"),
            }
        }
        if let Some(level) = log_level.filter(|level| !level.is_empty()) {
            match level.parse::<log::Level>() {
                Ok(_) => config.log_level = level.to_owned(),
                Err(err) => log::warn!("Ignoring CHANNEL_LOG_LEVEL {level:?}: {err}"),
            }
        }
        config
    }

    /// Parsed log level, `Info` when the configured one is unknown.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
