//! Remote content store configuration.

use serde::{Deserialize, Serialize};

fn default_api_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

const fn default_page_size() -> u32 {
    100
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL of the store's REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value sent in the API version header.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Pre-issued integration token. Token acquisition happens elsewhere.
    #[serde(default)]
    pub token: String,

    /// Database holding post pages.
    #[serde(default)]
    pub posts_database_id: String,

    /// Database holding series pages.
    #[serde(default)]
    pub series_database_id: String,

    /// Page size for database queries and child listings (store maximum is 100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            token: String::new(),
            posts_database_id: String::new(),
            series_database_id: String::new(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Check if the store has the minimum required fields for remote access.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
            && !self.posts_database_id.is_empty()
            && !self.series_database_id.is_empty()
    }

    /// Page size clamped to the range the store accepts.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, 100)
    }
}
