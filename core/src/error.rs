//! Error types for request adaptation.
//!
//! # Design
//! One variant per failure kind. `MissingDescriptor`, `InvalidDescriptor` and
//! `UnsupportedMethod` are detected before the builder is touched.
//! `ContentRead` is the only failure that can surface after message headers
//! have already been applied.

use thiserror::Error;

/// Errors returned by `from_request` and `RequestAdapter::adapt`.
#[derive(Debug, Error)]
pub enum AdaptError {
    /// No request descriptor was supplied.
    #[error("request descriptor is missing")]
    MissingDescriptor,

    /// The descriptor is present but cannot be adapted, e.g. it has no URI.
    #[error("invalid request descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// The method is not one of GET, POST, PUT, DELETE, PATCH or HEAD.
    #[error("HTTP method '{method}' is not supported")]
    UnsupportedMethod { method: String },

    /// The content body could not be drained.
    #[error("failed to read request content")]
    ContentRead(#[source] std::io::Error),
}
