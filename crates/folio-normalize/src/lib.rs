//! # folio-normalize
//!
//! Turns raw store records into validated domain entities.
//!
//! - [`fields`]: declarative field manifests and required/optional policy
//! - [`assemble`]: per-entity assemblers for posts and series
//! - [`batch`]: partial-failure isolation across a list of records
//! - [`assets`]: cover image fallback chain
//! - [`featured`]: featured-series projection

pub mod assemble;
pub mod assets;
pub mod batch;
pub mod featured;
pub mod fields;

mod dates;

pub use assemble::{Assembler, assemble_post, assemble_series};
pub use assets::{AssetResolver, CoverSlots, CoverSource, ResolvedCover, Theme};
pub use batch::{Batch, ParseFailure, normalize_batch};
pub use featured::project_featured;
