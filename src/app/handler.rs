//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point the plugin shim feeds events
//! into. It mutates [`AppState`], issues transport calls for fetches and
//! interactions, and returns whether a render is needed plus the host actions
//! to execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Teardown`, `TogglePolling`
//! - **Polling**: `Tick`, `WebResponse`
//! - **Interactions**: `Like`, `Share`, `Follow`
//! - **Navigation and filter**: `KeyDown`, `KeyUp`, `FilterMode`, `Char`,
//!   `Backspace`, `ConfirmFilter`, `ExitFilter`

use crate::app::modes::InputMode;
use crate::app::{Action, AppState};
use crate::dispatcher::InteractionDispatcher;
use crate::domain::error::Result;
use crate::engine::{FetchTicket, MergeOutcome};
use crate::transport::{decode_feed, decode_interaction, CampaignTransport, RequestContext};

/// Events triggered by user input, timers, or completed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Plugin finished loading; starts polling.
    Mount,
    /// Host is closing the plugin; stops polling for good.
    Teardown,
    /// Pauses a running feed or resumes a paused one.
    TogglePolling,
    /// The poll timer fired.
    Tick,
    /// A web request issued through the transport completed.
    WebResponse {
        context: RequestContext,
        status: u16,
        body: Vec<u8>,
    },

    KeyDown,
    KeyUp,
    /// Likes the selected post.
    Like,
    /// Shares the selected post.
    Share,
    /// Follows the brand of the selected post.
    Follow,

    /// Enters brand filter mode.
    FilterMode,
    Char(char),
    Backspace,
    /// Leaves filter mode keeping the query.
    ConfirmFilter,
    /// Leaves filter mode and clears the query.
    ExitFilter,
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Returns errors from state mutation. Request failures are not errors here;
/// they are absorbed by the engine and dispatcher.
pub fn handle_event<T: CampaignTransport + ?Sized>(
    state: &mut AppState,
    transport: &mut T,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount => {
            let actions = start_polling(state, transport);
            Ok((true, actions))
        }
        Event::Teardown => {
            state.engine.stop();
            Ok((false, vec![]))
        }
        Event::TogglePolling => {
            if state.engine.is_running() {
                state.engine.stop();
                Ok((true, vec![]))
            } else {
                state.last_outcome = None;
                let actions = start_polling(state, transport);
                Ok((true, actions))
            }
        }
        Event::Tick => {
            let Some(ticket) = state.engine.on_timer() else {
                tracing::debug!("timer fired while stopped, not re-arming");
                return Ok((false, vec![]));
            };
            transport.fetch_feed(ticket);
            Ok((false, schedule_next_tick(state)))
        }
        Event::WebResponse {
            context,
            status,
            body,
        } => Ok((handle_response(state, transport, context, *status, body), vec![])),

        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Like => {
            let Some(id) = state.selected_post().map(|p| p.id) else {
                return Ok((false, vec![]));
            };
            InteractionDispatcher::new(&mut state.engine, transport, state.policy).like(id);
            Ok((state.sync_from_engine(), vec![]))
        }
        Event::Share => {
            let Some(id) = state.selected_post().map(|p| p.id) else {
                return Ok((false, vec![]));
            };
            InteractionDispatcher::new(&mut state.engine, transport, state.policy).share(id);
            Ok((false, vec![]))
        }
        Event::Follow => {
            let Some(brand) = state.selected_post().map(|p| p.brand_name.clone()) else {
                return Ok((false, vec![]));
            };
            InteractionDispatcher::new(&mut state.engine, transport, state.policy).follow(&brand);
            Ok((state.sync_from_engine(), vec![]))
        }

        Event::FilterMode => {
            tracing::debug!("entering filter mode");
            state.input_mode = InputMode::Filter;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_filtering() {
                return Ok((false, vec![]));
            }
            state.filter_query.push(*c);
            tracing::trace!(query = %state.filter_query, "filter query updated");
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_filtering() {
                return Ok((false, vec![]));
            }
            state.filter_query.pop();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::ConfirmFilter => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ExitFilter => {
            tracing::debug!(query = %state.filter_query, "leaving filter mode");
            state.input_mode = InputMode::Normal;
            state.filter_query.clear();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn start_polling<T: CampaignTransport + ?Sized>(state: &mut AppState, transport: &mut T) -> Vec<Action> {
    let Some(ticket) = state.engine.start() else {
        return vec![];
    };
    transport.fetch_feed(ticket);
    schedule_next_tick(state)
}

fn schedule_next_tick(state: &mut AppState) -> Vec<Action> {
    if state.engine.arm_timer() {
        vec![Action::ScheduleTick(state.engine.poll_interval())]
    } else {
        vec![]
    }
}

fn handle_response<T: CampaignTransport + ?Sized>(
    state: &mut AppState,
    transport: &mut T,
    context: &RequestContext,
    status: u16,
    body: &[u8],
) -> bool {
    match context {
        RequestContext::Feed(ticket) => complete_feed(state, *ticket, status, body),
        RequestContext::Like { id } => {
            if let Err(e) = decode_interaction(status) {
                tracing::warn!(post_id = id, error = %e, "like request failed");
                InteractionDispatcher::new(&mut state.engine, transport, state.policy).like_failed(*id);
            }
            state.sync_from_engine()
        }
        RequestContext::Follow { brand_name } => {
            if let Err(e) = decode_interaction(status) {
                tracing::warn!(brand = %brand_name, error = %e, "follow request failed");
                InteractionDispatcher::new(&mut state.engine, transport, state.policy)
                    .follow_failed(brand_name);
            }
            state.sync_from_engine()
        }
    }
}

fn complete_feed(state: &mut AppState, ticket: FetchTicket, status: u16, body: &[u8]) -> bool {
    let outcome = state.engine.complete_fetch(ticket, decode_feed(status, body));
    tracing::debug!(outcome = ?outcome, "feed response handled");

    if matches!(outcome, MergeOutcome::Stale | MergeOutcome::Orphaned) {
        return false;
    }

    let status_changed = state.last_outcome != Some(outcome);
    state.last_outcome = Some(outcome);
    state.sync_from_engine() || status_changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::DeliveryPolicy;
    use crate::domain::PostId;
    use crate::engine::{EngineConfig, FeedEngine};
    use crate::ui::Theme;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct Recorder {
        fetches: Vec<FetchTicket>,
        likes: Vec<PostId>,
        follows: Vec<String>,
    }

    impl CampaignTransport for Recorder {
        fn fetch_feed(&mut self, ticket: FetchTicket) {
            self.fetches.push(ticket);
        }

        fn like(&mut self, id: PostId) {
            self.likes.push(id);
        }

        fn follow(&mut self, brand_name: &str) {
            self.follows.push(brand_name.to_string());
        }
    }

    const FEED: &str = r#"[
        {"id": 1, "brand_name": "EnduraStride", "stats": {"likes": 2, "shares": 0}, "isFollowing": false},
        {"id": 2, "brand_name": "SprintStyle", "stats": {"likes": 0, "shares": 1}, "isFollowing": false}
    ]"#;

    fn new_state(policy: DeliveryPolicy) -> AppState {
        let config = EngineConfig {
            poll_interval: Duration::from_millis(3000),
            overlay_cycle_budget: None,
        };
        AppState::new(FeedEngine::new(config), policy, Theme::default())
    }

    fn feed_response(ticket: FetchTicket, status: u16, body: &str) -> Event {
        Event::WebResponse {
            context: RequestContext::Feed(ticket),
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    fn mounted(policy: DeliveryPolicy) -> (AppState, Recorder) {
        let mut state = new_state(policy);
        let mut transport = Recorder::default();
        handle_event(&mut state, &mut transport, &Event::Mount).unwrap();
        let ticket = transport.fetches[0];
        handle_event(&mut state, &mut transport, &feed_response(ticket, 200, FEED)).unwrap();
        (state, transport)
    }

    #[test]
    fn mount_fetches_immediately_and_schedules_tick() {
        let mut state = new_state(DeliveryPolicy::default());
        let mut transport = Recorder::default();

        let (render, actions) = handle_event(&mut state, &mut transport, &Event::Mount).unwrap();

        assert!(render);
        assert_eq!(transport.fetches.len(), 1);
        assert_eq!(actions, vec![Action::ScheduleTick(Duration::from_millis(3000))]);
    }

    #[test]
    fn feed_response_publishes_newest_first() {
        let (state, _) = mounted(DeliveryPolicy::default());

        let ids: Vec<_> = state.visible_posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(state.last_outcome, Some(MergeOutcome::Published));
    }

    #[test]
    fn server_error_keeps_current_view() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());
        handle_event(&mut state, &mut transport, &Event::Tick).unwrap();
        let ticket = transport.fetches[1];

        let (render, _) =
            handle_event(&mut state, &mut transport, &feed_response(ticket, 500, "oops")).unwrap();

        assert!(render);
        assert_eq!(state.visible_posts.len(), 2);
    }

    #[test]
    fn tick_after_teardown_does_nothing() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());
        handle_event(&mut state, &mut transport, &Event::Teardown).unwrap();

        let (render, actions) = handle_event(&mut state, &mut transport, &Event::Tick).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(transport.fetches.len(), 1);
    }

    #[test]
    fn resume_while_old_timer_pending_does_not_double_schedule() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());

        handle_event(&mut state, &mut transport, &Event::TogglePolling).unwrap();
        let (_, actions) = handle_event(&mut state, &mut transport, &Event::TogglePolling).unwrap();

        assert!(actions.is_empty());
        assert_eq!(transport.fetches.len(), 2);

        let (_, actions) = handle_event(&mut state, &mut transport, &Event::Tick).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn like_updates_selected_post_and_sends_request() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());
        handle_event(&mut state, &mut transport, &Event::KeyDown).unwrap();

        let (render, _) = handle_event(&mut state, &mut transport, &Event::Like).unwrap();

        assert!(render);
        assert_eq!(transport.likes, vec![1]);
        assert_eq!(state.selected_post().map(|p| p.likes), Some(3));
    }

    #[test]
    fn failed_like_rolls_back_under_rollback_policy() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::RollbackOnFailure);
        handle_event(&mut state, &mut transport, &Event::KeyDown).unwrap();
        handle_event(&mut state, &mut transport, &Event::Like).unwrap();

        let failure = Event::WebResponse {
            context: RequestContext::Like { id: 1 },
            status: 503,
            body: vec![],
        };
        handle_event(&mut state, &mut transport, &failure).unwrap();

        assert_eq!(state.selected_post().map(|p| p.likes), Some(2));
    }

    #[test]
    fn follow_marks_every_post_of_the_brand() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());

        handle_event(&mut state, &mut transport, &Event::Follow).unwrap();

        assert_eq!(transport.follows, vec!["SprintStyle".to_string()]);
        assert!(state.selected_post().is_some_and(|p| p.is_following));
    }

    #[test]
    fn filter_typing_narrows_visible_posts() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());

        handle_event(&mut state, &mut transport, &Event::FilterMode).unwrap();
        for c in "endura".chars() {
            handle_event(&mut state, &mut transport, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.visible_posts.len(), 1);

        handle_event(&mut state, &mut transport, &Event::ExitFilter).unwrap();
        assert_eq!(state.visible_posts.len(), 2);
        assert!(state.filter_query.is_empty());
    }

    #[test]
    fn chars_are_ignored_outside_filter_mode() {
        let (mut state, mut transport) = mounted(DeliveryPolicy::default());

        let (render, _) = handle_event(&mut state, &mut transport, &Event::Char('x')).unwrap();

        assert!(!render);
        assert!(state.filter_query.is_empty());
    }
}
