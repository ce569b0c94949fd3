use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory the dated summary files are written to. A leading `~` is
    /// expanded to the user's home directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Value of the `#+FILETAGS:` header line
    #[serde(default = "default_tags")]
    pub tags: String,
    #[serde(default = "default_max_entries_per_feed")]
    pub max_entries_per_feed: usize,
    /// Timeout in seconds for every HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub llm: LlmConfig,
    pub sections: Vec<SectionConfig>,
}

fn default_output_dir() -> String {
    "~/Dropbox/ORG/RESOURCES/rss_summaries".to_string()
}

fn default_tags() -> String {
    ":rss:research:hydro:modelling:".to_string()
}

fn default_max_entries_per_feed() -> usize {
    3
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.5,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// A named group of feeds rendered under one top-level heading.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SectionConfig {
    pub name: String,
    pub feeds: Vec<String>,
}

impl SectionConfig {
    fn new(name: &str, feeds: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            feeds: feeds.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            tags: default_tags(),
            max_entries_per_feed: default_max_entries_per_feed(),
            request_timeout_secs: default_request_timeout_secs(),
            llm: LlmConfig::default(),
            sections: vec![
                SectionConfig::new(
                    "Academic Journals",
                    &[
                        "https://link.springer.com/search.rss?facet-journal-id=10040",
                        "https://ngwa.onlinelibrary.wiley.com/feed/17456584/most-recent",
                        "https://agupubs.onlinelibrary.wiley.com/rss/journal/19447973",
                    ],
                ),
                SectionConfig::new(
                    "Preprints / Open Science",
                    &[
                        "https://arxiv.org/rss/physics.geo-ph",
                        "https://arxiv.org/rss/cs.CE",
                    ],
                ),
                SectionConfig::new(
                    "Tools and Packages",
                    &[
                        "https://github.com/modflowpy/flopy/releases.atom",
                        "https://github.com/usgs/pestpp/releases.atom",
                        "https://github.com/pypest/pyemu/releases.atom",
                    ],
                ),
            ],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load from `path`, falling back to the built-in feed list when the
    /// file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate config from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::Invalid("no sections configured".into()));
        }
        if self.max_entries_per_feed == 0 {
            return Err(ConfigError::Invalid(
                "max_entries_per_feed must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature {} is outside 0.0..=2.0",
                self.llm.temperature
            )));
        }
        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(ConfigError::Invalid("section name is empty".into()));
            }
            for feed in &section.feeds {
                let url = reqwest::Url::parse(feed).map_err(|e| {
                    ConfigError::Invalid(format!(
                        "feed '{}' in section '{}' is not a valid URL: {}",
                        feed, section.name, e
                    ))
                })?;
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(ConfigError::Invalid(format!(
                        "feed '{}' in section '{}' must use http or https",
                        feed, section.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// The output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        expand_home(&self.output_dir)
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
