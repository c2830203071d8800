//! Revalidation windows per entity class.

use std::fmt;
use std::time::Duration;

use folio_config::CacheConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheClass {
    Series,
    Posts,
    Pages,
    Featured,
}

impl CacheClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Posts => "posts",
            Self::Pages => "pages",
            Self::Featured => "featured",
        }
    }
}

impl fmt::Display for CacheClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TTL lookup table. Defaults: series, pages and featured 600 s; posts 300 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    series: Duration,
    posts: Duration,
    pages: Duration,
    featured: Duration,
}

impl CachePolicy {
    #[must_use]
    pub const fn from_config(config: &CacheConfig) -> Self {
        Self {
            series: Duration::from_secs(config.series_ttl_secs),
            posts: Duration::from_secs(config.posts_ttl_secs),
            pages: Duration::from_secs(config.pages_ttl_secs),
            featured: Duration::from_secs(config.featured_ttl_secs),
        }
    }

    #[must_use]
    pub const fn ttl(&self, class: CacheClass) -> Duration {
        match class {
            CacheClass::Series => self.series,
            CacheClass::Posts => self.posts,
            CacheClass::Pages => self.pages,
            CacheClass::Featured => self.featured,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
