//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the library and the Zellij host. All host
//! calls (`web_request`, `set_timeout`, `hide_self`) live here so the library
//! stays testable natively.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; polling starts once granted
//! 3. **Poll**: `Timer` events drive fetches, `WebRequestResult` events carry replies
//! 4. **Close**: `BeforeClose` stops the engine so late replies are dropped
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! In normal mode:
//! - `j` / `k`: Move down / up
//! - `l`: Like
//! - `s`: Share
//! - `f`: Follow brand
//! - `/`: Filter by brand
//! - `p`: Pause or resume polling
//! - `q` / `Esc`: Hide the plugin
//!
//! In filter mode:
//! - Printable keys: Type into the filter
//! - `Enter`: Keep the filter and return to normal mode
//! - `Esc`: Clear the filter

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use campaign_feed::engine::FetchTicket;
use campaign_feed::transport::{CampaignTransport, Endpoints, RequestContext};
use campaign_feed::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Issues campaign requests through the host's `web_request`.
///
/// Every request carries a [`RequestContext`] map so its reply can be routed
/// back when the `WebRequestResult` event arrives.
struct ZellijTransport {
    endpoints: Endpoints,
}

impl ZellijTransport {
    fn send(&self, url: String, verb: HttpVerb, context: &RequestContext) {
        tracing::debug!(url = %url, kind = context.kind(), "sending web request");

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        web_request(url, verb, headers, vec![], context.to_map());
    }
}

impl CampaignTransport for ZellijTransport {
    fn fetch_feed(&mut self, ticket: FetchTicket) {
        self.send(self.endpoints.feed(), HttpVerb::Get, &RequestContext::Feed(ticket));
    }

    fn like(&mut self, id: i64) {
        self.send(self.endpoints.like(id), HttpVerb::Post, &RequestContext::Like { id });
    }

    fn follow(&mut self, brand_name: &str) {
        let context = RequestContext::Follow {
            brand_name: brand_name.to_string(),
        };
        self.send(self.endpoints.follow(brand_name), HttpVerb::Post, &context);
    }
}

/// Plugin state wrapper.
struct State {
    app: campaign_feed::AppState,
    transport: ZellijTransport,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: campaign_feed::initialize(&default_config),
            transport: ZellijTransport {
                endpoints: Endpoints::new(default_config.endpoint),
            },
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        campaign_feed::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = campaign_feed::initialize(&config);
        self.transport = ZellijTransport {
            endpoints: Endpoints::new(config.endpoint.clone()),
        };

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::BeforeClose,
        ]);

        tracing::debug!(endpoint = %config.endpoint, "plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("web access granted - starting feed");
                    Event::Mount
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - feed cannot be polled");
                    return false;
                }
            },
            zellij_tile::prelude::Event::BeforeClose => Event::Teardown,
            _ => return false,
        };

        match handle_event(&mut self.app, &mut self.transport, &our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        campaign_feed::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        let filtering = self.app.input_mode == InputMode::Filter;
        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Esc if filtering => Event::ExitFilter,
            BareKey::Enter if filtering => Event::ConfirmFilter,
            BareKey::Backspace if filtering => Event::Backspace,
            BareKey::Char(c) if filtering => Event::Char(c),
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('l') => Event::Like,
            BareKey::Char('s') => Event::Share,
            BareKey::Char('f') => Event::Follow,
            BareKey::Char('/') => Event::FilterMode,
            BareKey::Char('p') => Event::TogglePolling,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(context) = RequestContext::from_map(context) else {
            tracing::debug!("web response without a known context, ignoring");
            return None;
        };

        tracing::debug!(status = status, kind = context.kind(), body_len = body.len(), "web response");
        Some(Event::WebResponse {
            context,
            status,
            body,
        })
    }

    fn execute_action(action: &Action) {
        match action {
            Action::ScheduleTick(delay) => {
                tracing::trace!(delay_ms = delay.as_millis() as u64, "arming poll timer");
                set_timeout(delay.as_secs_f64());
            }
            Action::CloseFocus => {
                tracing::debug!("hiding plugin pane");
                hide_self();
            }
        }
    }
}
