//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the engine. Host events are
//! translated into [`Event`]s, [`handle_event`] applies them, and the returned
//! [`Action`]s are executed by the runtime.
//!
//! ```text
//! Host events → Events → handle_event → Engine / Dispatcher → Transport
//!                             ↓                   ↓
//!                          Actions       on_update → AppState → render
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Host side effects emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode type
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
