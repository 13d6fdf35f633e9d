//! Shared harness: a recording transport and a virtual clock that turns
//! scheduled ticks into `Event::Tick` deliveries.

#![allow(dead_code)]

use campaign_feed::engine::FetchTicket;
use campaign_feed::transport::{CampaignTransport, RequestContext};
use campaign_feed::{handle_event, initialize, Action, AppState, Config, Event, PostId};
use std::time::Duration;

pub const PERIOD: Duration = Duration::from_millis(3000);

/// Records every request instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub fetches: Vec<FetchTicket>,
    pub likes: Vec<PostId>,
    pub follows: Vec<String>,
    pub shares: Vec<PostId>,
}

impl CampaignTransport for RecordingTransport {
    fn fetch_feed(&mut self, ticket: FetchTicket) {
        self.fetches.push(ticket);
    }

    fn like(&mut self, id: PostId) {
        self.likes.push(id);
    }

    fn follow(&mut self, brand_name: &str) {
        self.follows.push(brand_name.to_string());
    }

    fn share(&mut self, id: PostId) {
        self.shares.push(id);
    }
}

/// Drives the plugin the way the host would, on virtual time.
pub struct Harness {
    pub state: AppState,
    pub transport: RecordingTransport,
    pub now: Duration,
    timers: Vec<Duration>,
}

impl Harness {
    pub fn new(config: &Config) -> Self {
        Self {
            state: initialize(config),
            transport: RecordingTransport::default(),
            now: Duration::ZERO,
            timers: Vec::new(),
        }
    }

    pub fn mounted() -> Self {
        let mut harness = Self::new(&Config::default());
        harness.dispatch(&Event::Mount);
        harness
    }

    pub fn dispatch(&mut self, event: &Event) -> bool {
        let (render, actions) =
            handle_event(&mut self.state, &mut self.transport, event).expect("event handled");
        for action in actions {
            if let Action::ScheduleTick(delay) = action {
                self.timers.push(self.now + delay);
            }
        }
        render
    }

    /// Advances virtual time, firing every timer that comes due on the way.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        loop {
            let due = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, at)| **at <= target)
                .min_by_key(|(_, at)| **at)
                .map(|(index, at)| (index, *at));
            let Some((index, at)) = due else {
                break;
            };
            self.timers.remove(index);
            self.now = at;
            self.dispatch(&Event::Tick);
        }
        self.now = target;
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn fetch_count(&self) -> usize {
        self.transport.fetches.len()
    }

    pub fn ticket(&self, index: usize) -> FetchTicket {
        self.transport.fetches[index]
    }

    pub fn respond(&mut self, ticket: FetchTicket, status: u16, body: &str) -> bool {
        self.dispatch(&Event::WebResponse {
            context: RequestContext::Feed(ticket),
            status,
            body: body.as_bytes().to_vec(),
        })
    }

    /// Answers the most recent fetch.
    pub fn respond_latest(&mut self, status: u16, body: &str) -> bool {
        let ticket = *self.transport.fetches.last().expect("a fetch was issued");
        self.respond(ticket, status, body)
    }

    pub fn visible_ids(&self) -> Vec<PostId> {
        self.state.visible_posts.iter().map(|p| p.id).collect()
    }

    pub fn likes_of(&self, id: PostId) -> Option<u64> {
        self.state
            .engine
            .current_view()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.likes)
    }
}

/// JSON body for posts given as `(id, brand, likes, is_following)`.
pub fn feed(posts: &[(PostId, &str, u64, bool)]) -> String {
    let items: Vec<String> = posts
        .iter()
        .map(|(id, brand, likes, following)| {
            format!(
                r#"{{"id": {id}, "brand_name": "{brand}", "usp": "", "caption": "post {id}", "timestamp": "2024-05-01T09:30:00", "stats": {{"likes": {likes}, "shares": 0}}, "isFollowing": {following}, "reactions": []}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}
