//! Revalidation windows per entity class.

use serde::{Deserialize, Serialize};

const fn default_series_ttl_secs() -> u64 {
    600
}

const fn default_posts_ttl_secs() -> u64 {
    300
}

const fn default_pages_ttl_secs() -> u64 {
    600
}

const fn default_featured_ttl_secs() -> u64 {
    600
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_series_ttl_secs")]
    pub series_ttl_secs: u64,

    #[serde(default = "default_posts_ttl_secs")]
    pub posts_ttl_secs: u64,

    #[serde(default = "default_pages_ttl_secs")]
    pub pages_ttl_secs: u64,

    #[serde(default = "default_featured_ttl_secs")]
    pub featured_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            series_ttl_secs: default_series_ttl_secs(),
            posts_ttl_secs: default_posts_ttl_secs(),
            pages_ttl_secs: default_pages_ttl_secs(),
            featured_ttl_secs: default_featured_ttl_secs(),
        }
    }
}
