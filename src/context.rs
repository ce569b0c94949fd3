use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Client;

use crate::config::Config;
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const USER_AGENT: &str = concat!("rss2org/", env!("CARGO_PKG_VERSION"), " (RSS Summarizer)");

/// Everything a run needs, built once at startup and handed to each component.
pub struct Context {
    config: Config,
    api_key: String,
    auth: HeaderValue,
    http: Client,
}

/// `Bearer <key>` as a header value, rejecting keys that cannot be sent.
pub fn bearer_header(api_key: &str) -> Result<HeaderValue, ConfigError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| ConfigError::InvalidApiKey)?;
    value.set_sensitive(true);
    Ok(value)
}

impl Context {
    /// Fails with [`ConfigError::MissingApiKey`] before doing anything else
    /// when the key is absent or blank.
    pub fn new(config: Config, api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let auth = bearer_header(&api_key)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            config,
            api_key,
            auth,
            http,
        })
    }

    pub fn from_env(config: Config) -> Result<Self, ConfigError> {
        Self::new(config, std::env::var(API_KEY_VAR).ok())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn auth_header(&self) -> &HeaderValue {
        &self.auth
    }

    pub fn http(&self) -> &Client {
        &self.http
    }
}
