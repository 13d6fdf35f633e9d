//! Campaign Feed: a Zellij plugin showing a live feed of brand campaign posts.
//!
//! The plugin polls a campaign service on a fixed interval, keeps the newest
//! snapshot on screen, and lets the viewer like posts, share them, and follow
//! brands. Likes and follows show up immediately through an optimistic
//! overlay that is reconciled against later snapshots.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls, web_request
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← events, actions,
//! │                                                     │    view model
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Engine        │   │ Transport     │
//! │ (ui/)         │   │ (engine/,     │   │ (transport/)  │
//! │ - Cards       │   │  dispatcher)  │   │ - Endpoints   │
//! │ - Theming     │   │ - Polling     │   │ - Decoding    │
//! │               │   │ - Overlay     │   │ - Correlation │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - Post model, FeedError                            │
//! │  - Sandbox paths                                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + OpenTelemetry, OTLP JSON file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/campaign-feed.wasm" {
//!         endpoint "http://localhost:8000"
//!         poll_interval_ms "3000"
//!         rollback_on_failure "false"
//!         theme "midnight"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use campaign_feed::{handle_event, initialize, Config, Event};
//! use campaign_feed::engine::FetchTicket;
//! use campaign_feed::transport::CampaignTransport;
//!
//! #[derive(Default)]
//! struct Offline(Vec<FetchTicket>);
//!
//! impl CampaignTransport for Offline {
//!     fn fetch_feed(&mut self, ticket: FetchTicket) { self.0.push(ticket); }
//!     fn like(&mut self, _id: i64) {}
//!     fn follow(&mut self, _brand_name: &str) {}
//! }
//!
//! let mut state = initialize(&Config::default());
//! let mut transport = Offline::default();
//! let (_render, actions) = handle_event(&mut state, &mut transport, &Event::Mount)?;
//! assert_eq!(transport.0.len(), 1);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), campaign_feed::FeedError>(())
//! ```

pub mod app;
pub mod dispatcher;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod transport;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{FeedError, Post, PostId, Result};
pub use ui::Theme;

use dispatcher::DeliveryPolicy;
use engine::{EngineConfig, FeedEngine, DEFAULT_POLL_INTERVAL};
use std::collections::BTreeMap;
use std::time::Duration;
use transport::endpoints::DEFAULT_BASE_URL;

/// Shortest accepted poll interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the campaign service.
    pub endpoint: String,

    /// Delay between polls. Never below [`MIN_POLL_INTERVAL`].
    pub poll_interval: Duration,

    /// Poll cycles an unconfirmed optimistic change survives. `None`, the
    /// default, keeps it until confirmed or rolled back.
    pub overlay_cycle_budget: Option<u32>,

    /// Withdraw optimistic likes and follows when their request fails.
    pub rollback_on_failure: bool,

    /// Built-in theme name, `midnight` or `daylight`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the sandbox `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            overlay_cycle_budget: None,
            rollback_on_failure: false,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparseable values fall back to their defaults with a
    /// warning; parsing never fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use campaign_feed::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "http://feed.local:9000/".to_string());
    /// map.insert("poll_interval_ms".to_string(), "100".to_string());
    /// map.insert("overlay_cycle_budget".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "http://feed.local:9000");
    /// assert_eq!(config.poll_interval, Duration::from_millis(250));
    /// assert_eq!(config.overlay_cycle_budget, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let endpoint = config
            .get("endpoint")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.endpoint);

        let poll_interval = parse_or_warn::<u64>(config, "poll_interval_ms")
            .map_or(defaults.poll_interval, Duration::from_millis)
            .max(MIN_POLL_INTERVAL);

        let overlay_cycle_budget = parse_or_warn::<u32>(config, "overlay_cycle_budget")
            .map_or(defaults.overlay_cycle_budget, |n| (n > 0).then_some(n));

        let rollback_on_failure = config
            .get("rollback_on_failure")
            .and_then(|raw| match parse_flag(raw) {
                Ok(flag) => Some(flag),
                Err(e) => {
                    tracing::warn!(error = %e, "using default");
                    None
                }
            })
            .unwrap_or(defaults.rollback_on_failure);

        Self {
            endpoint,
            poll_interval,
            overlay_cycle_budget,
            rollback_on_failure,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Engine settings derived from this configuration.
    #[must_use]
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            poll_interval: self.poll_interval,
            overlay_cycle_budget: self.overlay_cycle_budget,
        }
    }

    #[must_use]
    pub const fn delivery_policy(&self) -> DeliveryPolicy {
        if self.rollback_on_failure {
            DeliveryPolicy::RollbackOnFailure
        } else {
            DeliveryPolicy::FireAndForget
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str) -> Option<T> {
    let raw = config.get(key)?;
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        tracing::warn!(key = key, value = %raw, "invalid config value, using default");
    }
    parsed
}

/// Parses a boolean option, accepting `true/false`, `yes/no`, `on/off` and `1/0`.
///
/// # Errors
///
/// Returns [`FeedError::Config`] for anything else.
pub fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(FeedError::Config(format!("expected a boolean, got {other:?}"))),
    }
}

/// Builds the application state for a configuration.
///
/// The engine is created stopped; polling begins with [`Event::Mount`].
/// Theme loading falls back to the default theme on any error.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        endpoint = %config.endpoint,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        rollback_on_failure = config.rollback_on_failure,
        "initializing campaign feed plugin"
    );

    let theme = match (&config.theme_file, &config.theme_name) {
        (Some(theme_file), _) => {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        }
        (None, Some(theme_name)) => Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        }),
        (None, None) => Theme::default(),
    };

    AppState::new(FeedEngine::new(config.engine_config()), config.delivery_policy(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());

        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.poll_interval, Duration::from_millis(3000));
        assert_eq!(config.overlay_cycle_budget, None);
        assert!(!config.rollback_on_failure);
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("poll_interval_ms", "soon"),
            ("overlay_cycle_budget", "-1"),
            ("rollback_on_failure", "maybe"),
        ]));

        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.overlay_cycle_budget, None);
        assert!(!config.rollback_on_failure);
    }

    #[test]
    fn cycle_budget_is_opt_in() {
        let config = Config::from_zellij(&map(&[("overlay_cycle_budget", "12")]));

        assert_eq!(config.overlay_cycle_budget, Some(12));
        assert_eq!(config.engine_config().overlay_cycle_budget, Some(12));
    }

    #[test]
    fn rollback_flag_selects_policy() {
        let config = Config::from_zellij(&map(&[("rollback_on_failure", "Yes")]));

        assert_eq!(config.delivery_policy(), DeliveryPolicy::RollbackOnFailure);
    }

    #[test]
    fn parse_flag_rejects_unknown_words() {
        assert!(matches!(parse_flag("sometimes"), Err(FeedError::Config(_))));
        assert!(parse_flag(" off ").is_ok_and(|f| !f));
    }

    #[test]
    fn initialize_falls_back_on_unknown_theme() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };

        let state = initialize(&config);

        assert_eq!(state.theme.name, "midnight");
        assert!(!state.engine.is_running());
    }
}
