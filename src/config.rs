use std::time::Duration;

use serde::Deserialize;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the catalog service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of movies requested per catalog page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period before a debounced search dispatches, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Timeout applied to every catalog request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_search_debounce_ms() -> u64 {
    400
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
