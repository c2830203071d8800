//! # folio-config
//!
//! Layered configuration loading for Folio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOLIO_*` prefix, `__` as separator)
//! 2. Project-level `.folio/config.toml`
//! 3. User-level `~/.config/folio/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOLIO_STORE__TOKEN` -> `store.token`, `FOLIO_CACHE__POSTS_TTL_SECS`
//! -> `cache.posts_ttl_secs`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::load_with_dotenv().expect("config");
//!
//! if config.store.is_configured() {
//!     println!("posts database: {}", config.store.posts_database_id);
//! }
//! ```

mod assets;
mod cache;
mod error;
mod featured;
mod store;

pub use assets::AssetConfig;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use featured::FeaturedConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub featured: FeaturedConfig,
}

impl FolioConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`FolioConfig::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`FolioConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".folio/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FOLIO_").split("__"))
    }

    /// Check the fields the content service cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the store section lacks a
    /// token or database ids, and [`ConfigError::InvalidValue`] for a zero TTL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.store.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "store".to_string(),
            });
        }
        let ttls = [
            ("cache.series_ttl_secs", self.cache.series_ttl_secs),
            ("cache.posts_ttl_secs", self.cache.posts_ttl_secs),
            ("cache.pages_ttl_secs", self.cache.pages_ttl_secs),
            ("cache.featured_ttl_secs", self.cache.featured_ttl_secs),
        ];
        if let Some((field, _)) = ttls.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::InvalidValue {
                field: (*field).to_string(),
                reason: "TTL must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
