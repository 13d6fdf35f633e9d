//! Host-side effects produced by the event handler.
//!
//! Network requests go through the [`CampaignTransport`](crate::transport::CampaignTransport)
//! passed to [`handle_event`](crate::app::handle_event). What remains are effects
//! only the plugin host can perform, returned as [`Action`]s and executed by
//! the plugin shim in order.
//!
//! # Example
//!
//! ```rust
//! use campaign_feed::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![Action::ScheduleTick(Duration::from_millis(3000))];
//! assert_eq!(actions.len(), 1);
//! ```

use std::time::Duration;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms the host timer; a `Tick` event is expected after the delay.
    ScheduleTick(Duration),

    /// Hides the plugin pane.
    ///
    /// Hiding does not tear the view down; polling keeps running.
    CloseFocus,
}
