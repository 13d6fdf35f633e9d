//! Terminal rendering layer.
//!
//! Rendering is declarative: application state is reduced to a
//! [`UIViewModel`], which the components print as ANSI-styled text.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Header, filter box, cards, footer, empty state
//! - [`helpers`]: Cursor positioning, truncation, match highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{CardItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
