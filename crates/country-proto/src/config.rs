use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::error::ConfigError;
use super::notify::Notifier;
use super::platform;
use super::record::DEFAULT_FIELDS;
use super::render::Renderer;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_LIST_LIMIT: usize = 20;
pub const DEFAULT_INPUT_SELECTOR: &str = "#search-box";
pub const DEFAULT_LIST_SELECTOR: &str = ".country-list";
pub const DEFAULT_DETAIL_SELECTOR: &str = ".country-info";

// ── Controller options ────────────────────────────────────────────────────────

/// Overrides for a controller; anything left `None` takes its default.
#[derive(Clone, Default)]
pub struct SearchOptions {
    pub input_selector: Option<String>,
    pub list_selector: Option<String>,
    pub detail_selector: Option<String>,
    pub fields: Option<Vec<String>>,
    pub debounce_delay: Option<Duration>,
    pub list_limit: Option<usize>,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub renderer: Option<Arc<dyn Renderer>>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_selector(mut self, selector: impl Into<String>) -> Self {
        self.input_selector = Some(selector.into());
        self
    }

    pub fn list_selector(mut self, selector: impl Into<String>) -> Self {
        self.list_selector = Some(selector.into());
        self
    }

    pub fn detail_selector(mut self, selector: impl Into<String>) -> Self {
        self.detail_selector = Some(selector.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = Some(delay);
        self
    }

    pub fn list_limit(mut self, limit: usize) -> Self {
        self.list_limit = Some(limit);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }
}

impl fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("input_selector", &self.input_selector)
            .field("list_selector", &self.list_selector)
            .field("detail_selector", &self.detail_selector)
            .field("fields", &self.fields)
            .field("debounce_delay", &self.debounce_delay)
            .field("list_limit", &self.list_limit)
            .field("notifier", &self.notifier.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Resolved controller settings. Built once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_url: String,
    pub input_selector: String,
    pub list_selector: String,
    pub detail_selector: String,
    pub fields: Vec<String>,
    pub debounce_delay: Duration,
    pub list_limit: usize,
}

impl SearchConfig {
    /// Merge `options` over the defaults. A blank base URL is rejected.
    pub fn resolve(base_url: &str, options: &SearchOptions) -> Result<Self, ConfigError> {
        if base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Ok(Self {
            base_url: base_url.to_string(),
            input_selector: options
                .input_selector
                .clone()
                .unwrap_or_else(|| DEFAULT_INPUT_SELECTOR.to_string()),
            list_selector: options
                .list_selector
                .clone()
                .unwrap_or_else(|| DEFAULT_LIST_SELECTOR.to_string()),
            detail_selector: options
                .detail_selector
                .clone()
                .unwrap_or_else(|| DEFAULT_DETAIL_SELECTOR.to_string()),
            fields: options.fields.clone().unwrap_or_else(default_fields),
            debounce_delay: options
                .debounce_delay
                .unwrap_or(Duration::from_millis(DEFAULT_DEBOUNCE_MS)),
            list_limit: options.list_limit.unwrap_or(DEFAULT_LIST_LIMIT),
        })
    }

    /// `base_url + encoded query + ?fields=a,b,c`. The fields part is left
    /// off when no fields are configured.
    pub fn query_url(&self, query: &str) -> String {
        let mut url = format!("{}{}", self.base_url, urlencoding::encode(query));
        if !self.fields.is_empty() {
            url.push_str("?fields=");
            url.push_str(&self.fields.join(","));
        }
        url
    }
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_app_list_limit")]
    pub list_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fields: default_fields(),
        }
    }
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            list_limit: default_app_list_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://restcountries.com/v3.1/name/".to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

// The app shows at most ten matches; the controller default is looser.
fn default_app_list_limit() -> usize {
    10
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Controller options carrying this file's search settings.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::new()
            .fields(self.api.fields.iter().cloned())
            .debounce_delay(Duration::from_millis(self.search.debounce_ms))
            .list_limit(self.search.list_limit)
    }
}
