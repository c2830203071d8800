//! Content store error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote content store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a store response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// The store returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The store handed back a cursor it had already returned for this listing.
    #[error("store repeated pagination cursor {cursor}")]
    RepeatedCursor { cursor: String },

    /// A configured credential could not be encoded as a header value.
    #[error("invalid header value for {header}")]
    InvalidHeader { header: &'static str },
}
