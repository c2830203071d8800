//! Featured series projection settings.

use serde::{Deserialize, Serialize};

const fn default_article_limit() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturedConfig {
    /// Maximum number of articles shown per featured series.
    #[serde(default = "default_article_limit")]
    pub article_limit: usize,
}

impl Default for FeaturedConfig {
    fn default() -> Self {
        Self {
            article_limit: default_article_limit(),
        }
    }
}
