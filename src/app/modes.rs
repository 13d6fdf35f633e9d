//! Input mode state for the feed view.
//!
//! The feed is browsed in one of two modes:
//! - **Normal**: navigation and the like/share/follow intents
//! - **Filter**: typing a brand filter; navigation keys still move the cursor
//!
//! # Example
//!
//! ```rust
//! use campaign_feed::app::InputMode;
//!
//! let mode = InputMode::Filter;
//! assert!(mode.is_filtering());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode. Keys map to navigation and post interactions.
    #[default]
    Normal,

    /// Brand filter input is active; printable keys extend the query.
    Filter,
}

impl InputMode {
    #[must_use]
    pub const fn is_filtering(self) -> bool {
        matches!(self, Self::Filter)
    }
}
