//! Error types for the campaign feed client.
//!
//! This module defines the centralized error type [`FeedError`] and a type alias
//! [`Result`] used throughout the crate. All variants are implemented with the
//! `thiserror` crate.
//!
//! None of these errors is fatal: the feed engine absorbs transport failures and
//! keeps the last published view on screen.

use thiserror::Error;

/// The main error type for campaign feed operations.
///
/// # Examples
///
/// ```
/// use campaign_feed::domain::FeedError;
///
/// fn parse_body(body: &str) -> Result<(), FeedError> {
///     Err(FeedError::MalformedResponse(format!("not an array: {body}")))
/// }
/// ```
#[derive(Debug, Error)]
pub enum FeedError {
    /// The remote endpoint was unreachable or answered with a non-2xx status.
    ///
    /// The feed fetch path absorbs this into an empty snapshot; like and
    /// follow requests only log it (or roll back when configured to).
    #[error("Network error: {0}")]
    Network(String),

    /// The payload was not a valid JSON array of posts.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Converts from `std::io::Error` via `#[from]`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for campaign feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
