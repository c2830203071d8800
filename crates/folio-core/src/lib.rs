//! # folio-core
//!
//! Core types and error taxonomy for Folio.
//!
//! This crate provides the foundational types shared across all Folio crates:
//! - Entity structs for the normalized domain (posts, series, featured projections, blocks)
//! - Closed enums for content type, focus area, and series status
//! - Record-level and query-level error types with structured context

pub mod entities;
pub mod enums;
pub mod errors;
