//! # folio-cache
//!
//! Keyed time-to-live caching for the content orchestrator.
//!
//! - [`cache_key`]: deterministic keys from an operation name and parameters
//! - [`CachePolicy`]: revalidation window per [`CacheClass`]
//! - [`TtlCache`]: check-then-compute-then-store cache over an injectable [`Clock`]
//!
//! There is no single-flight: two callers that miss the same key at the same
//! time both run the computation and the later store wins. Computations are
//! idempotent reads, so the duplicate is only wasted work.

pub mod clock;
pub mod key;
pub mod policy;

mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::cache_key;
pub use policy::{CacheClass, CachePolicy};
pub use ttl::TtlCache;
