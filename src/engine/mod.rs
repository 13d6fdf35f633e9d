//! Feed synchronization engine and its optimistic overlay.
//!
//! # Data Flow
//!
//! ```text
//! Transport ──snapshot──▶ FeedEngine::complete_fetch ──merge──▶ current_view() ──▶ Presentation
//!                               ▲
//! Dispatcher ──apply_like / apply_follow (optimistic)
//! ```
//!
//! # Modules
//!
//! - [`feed`]: Lifecycle, merge algorithm, publishing
//! - [`overlay`]: Unconfirmed local deltas and their reconciliation
//! - [`viewmodel`]: The render-ready post handed to the presentation layer
//!
//! # Example
//!
//! ```rust
//! use campaign_feed::domain::Post;
//! use campaign_feed::engine::{FeedEngine, MergeOutcome};
//!
//! let mut engine = FeedEngine::default();
//! let ticket = engine.start().unwrap();
//!
//! let outcome = engine.complete_fetch(ticket, Ok(vec![Post::new(1, "A"), Post::new(2, "B")]));
//! assert_eq!(outcome, MergeOutcome::Published);
//! assert_eq!(engine.current_view()[0].id, 2);
//! ```

pub mod feed;
pub mod overlay;
pub mod viewmodel;

pub use feed::{
    EngineConfig, EngineState, FeedEngine, FetchTicket, MergeOutcome, UpdateCallback,
    DEFAULT_POLL_INTERVAL,
};
pub use overlay::{FollowOverlay, LikeOverlay, OverlayTable, Reconciliation};
pub use viewmodel::PostViewModel;
