//! Cover image fallback chain.
//!
//! ```text
//! 1. theme rich-text filename  → {cover_base_path}/{filename}
//! 2. files property            → uploaded URL, else external URL
//! 3. page-level cover          → file or external URL
//! 4. placeholder (if enabled)  → {placeholder_base_url}/{id}/1200/630
//! ```
//!
//! Each step runs only when the previous one produced nothing. Local assets
//! always win over third-party URLs.

use folio_config::AssetConfig;
use folio_store::RawRecord;
use folio_store::extract;
use folio_store::property::preferred_file_url;

use crate::fields::{self, FieldSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Which properties feed the chain for one entity and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverSlots {
    pub local: FieldSpec,
    pub files: FieldSpec,
    pub placeholder: bool,
}

impl CoverSlots {
    /// Series covers come in a light and a dark variant and fall back to a placeholder.
    #[must_use]
    pub const fn series(theme: Theme) -> Self {
        let local = match theme {
            Theme::Light => fields::series::COVER_LIGHT,
            Theme::Dark => fields::series::COVER_DARK,
        };
        Self {
            local,
            files: fields::series::COVER,
            placeholder: true,
        }
    }

    /// Post covers are optional, so no placeholder.
    #[must_use]
    pub const fn post() -> Self {
        Self {
            local: fields::post::COVER_IMAGE,
            files: fields::post::COVER,
            placeholder: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSource {
    LocalAsset,
    FilesProperty,
    PageCover,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCover {
    pub url: String,
    pub source: CoverSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    cover_base_path: String,
    placeholder_base_url: Option<String>,
}

impl AssetResolver {
    pub fn new(cover_base_path: impl Into<String>, placeholder_base_url: Option<String>) -> Self {
        Self {
            cover_base_path: cover_base_path.into(),
            placeholder_base_url: placeholder_base_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }

    #[must_use]
    pub fn from_config(config: &AssetConfig) -> Self {
        Self::new(
            config.cover_base_path.clone(),
            Some(config.placeholder_base_url.clone()),
        )
    }

    /// Run the fallback chain for `record`.
    #[must_use]
    pub fn resolve(&self, record: &RawRecord, slots: &CoverSlots) -> Option<ResolvedCover> {
        let filename = extract::rich_text(fields::optional(record, &slots.local));
        if !filename.trim().is_empty() {
            return Some(ResolvedCover {
                url: self.local_asset_path(&filename),
                source: CoverSource::LocalAsset,
            });
        }

        let files = extract::files(fields::optional(record, &slots.files));
        if let Some(url) = preferred_file_url(&files) {
            return Some(ResolvedCover {
                url: url.to_string(),
                source: CoverSource::FilesProperty,
            });
        }

        if let Some(cover) = record.cover.as_ref().filter(|c| !c.url().trim().is_empty()) {
            return Some(ResolvedCover {
                url: cover.url().to_string(),
                source: CoverSource::PageCover,
            });
        }

        if slots.placeholder {
            return self.placeholder_url(&record.id).map(|url| ResolvedCover {
                url,
                source: CoverSource::Placeholder,
            });
        }
        None
    }

    /// Join an author-supplied filename onto the cover directory.
    #[must_use]
    pub fn local_asset_path(&self, filename: &str) -> String {
        format!(
            "{}/{}",
            self.cover_base_path.trim_end_matches('/'),
            filename.trim().trim_start_matches('/')
        )
    }

    /// Deterministic placeholder for `seed`, when placeholders are enabled.
    #[must_use]
    pub fn placeholder_url(&self, seed: &str) -> Option<String> {
        self.placeholder_base_url
            .as_ref()
            .map(|base| format!("{base}/{}/1200/630", urlencoding::encode(seed)))
    }
}
