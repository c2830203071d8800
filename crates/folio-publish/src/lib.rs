//! # folio-publish
//!
//! The write path: the property vocabulary used for reading, applied in
//! reverse.
//!
//! - [`PostDraft`] maps to the store's property-bag shape via [`to_properties`]
//! - [`ensure_known_options`] rejects select values the store does not offer
//! - [`parse_generated_metadata`] treats AI output as an untrusted JSON
//!   candidate and validates it against the schema of [`GeneratedMetadata`]
//! - [`publish`] ties validation to an opaque [`PageWriter`]

mod draft;
mod error;
mod metadata;
mod options;
mod writer;

pub use draft::{PostDraft, to_properties};
pub use error::PublishError;
pub use metadata::{
    GeneratedMetadata, TextGenerator, enrich_draft, generate_metadata,
    parse_generated_metadata,
};
pub use options::{DatabaseOptions, ensure_known_options};
pub use writer::{PageWriter, publish};
