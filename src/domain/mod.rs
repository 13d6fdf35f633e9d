//! Domain layer for the campaign feed client.
//!
//! Holds the wire-level post model and the error taxonomy, independent of the
//! Zellij host and of the engine that merges snapshots.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`post`]: Post, stats and reaction types as delivered by the feed endpoint
//!
//! # Examples
//!
//! ```
//! use campaign_feed::domain::{Post, Result};
//!
//! fn first_post(body: &str) -> Result<Option<Post>> {
//!     let posts: Vec<Post> = serde_json::from_str(body)
//!         .map_err(|e| campaign_feed::FeedError::MalformedResponse(e.to_string()))?;
//!     Ok(posts.into_iter().next())
//! }
//! ```

pub mod error;
pub mod post;

pub use error::{FeedError, Result};
pub use post::{Post, PostId, PostStats, Reaction};
