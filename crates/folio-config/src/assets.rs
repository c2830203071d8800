//! Cover image asset configuration.

use serde::{Deserialize, Serialize};

fn default_cover_base_path() -> String {
    "/images/covers".to_string()
}

fn default_placeholder_base_url() -> String {
    "https://picsum.photos/seed".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
    /// Directory that author-supplied cover filenames resolve against.
    #[serde(default = "default_cover_base_path")]
    pub cover_base_path: String,

    /// Base URL for id-seeded placeholder images. Empty disables placeholders.
    #[serde(default = "default_placeholder_base_url")]
    pub placeholder_base_url: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            cover_base_path: default_cover_base_path(),
            placeholder_base_url: default_placeholder_base_url(),
        }
    }
}

impl AssetConfig {
    pub fn placeholders_enabled(&self) -> bool {
        !self.placeholder_base_url.trim().is_empty()
    }
}
