//! Feed synchronization engine.
//!
//! [`FeedEngine`] is the single source of truth for what the user currently
//! sees. It owns the polling lifecycle, merges each fetched snapshot with the
//! optimistic overlay and publishes the resulting ordered list to subscribers.
//!
//! # Lifecycle
//!
//! ```text
//!            start()                tick/begin_poll()          complete_fetch()
//! Stopped ───────────▶ Idle ─────────────────────▶ Polling ─────────────────▶ Merging ──▶ Idle
//!    ▲                   │                            │                                     │
//!    └───────────────────┴──────── stop() ────────────┴─────────────────────────────────────┘
//! ```
//!
//! The engine never talks to the network itself. Starting a poll hands out a
//! [`FetchTicket`]; the caller issues the request and later returns the ticket
//! with the result. Tickets carry a generation (for last-response-wins
//! ordering) and a liveness epoch (so results arriving after `stop()` are
//! dropped).

use super::overlay::{LikeOverlay, OverlayTable};
use super::viewmodel::PostViewModel;
use crate::domain::{Post, PostId, Result};
use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Identifies one feed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    /// Monotonic per-engine fetch counter, starting at 1.
    pub generation: u64,
    /// Liveness epoch at the time the fetch started.
    pub epoch: u64,
}

/// Polling lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Running, no fetch outstanding.
    Idle,
    /// Running, at least one fetch outstanding.
    Polling,
    /// Applying a snapshot. Only observable from inside a publish callback.
    Merging,
    /// Not mounted. No fetches are started and late results are dropped.
    Stopped,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The snapshot was merged and a new view published.
    Published,
    /// The snapshot was empty; the previous view stays visible.
    Retained,
    /// A newer fetch was already merged; the result was dropped.
    Stale,
    /// The engine was stopped since the fetch started; the result was dropped.
    Orphaned,
    /// The response could not be used; the previous view stays visible.
    Failed,
}

/// Engine tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub poll_interval: Duration,
    /// Merge cycles an unconfirmed optimistic entry survives. `None`, the
    /// default, keeps it until confirmed or rolled back.
    pub overlay_cycle_budget: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            overlay_cycle_budget: None,
        }
    }
}

/// Callback fired with every newly published view.
pub type UpdateCallback = Box<dyn FnMut(&[PostViewModel])>;

/// Owns the raw snapshot, the optimistic overlay and the published view.
pub struct FeedEngine {
    config: EngineConfig,
    state: EngineState,
    epoch: u64,
    next_generation: u64,
    latest_merged: u64,
    in_flight: BTreeSet<u64>,
    timer_armed: bool,
    /// Raw posts of the last merged snapshot, in display order.
    snapshot: Vec<Post>,
    view: Vec<PostViewModel>,
    overlay: OverlayTable,
    subscribers: Vec<UpdateCallback>,
}

impl FeedEngine {
    /// Creates a stopped engine with an empty view.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Stopped,
            epoch: 0,
            next_generation: 1,
            latest_merged: 0,
            in_flight: BTreeSet::new(),
            timer_armed: false,
            snapshot: Vec::new(),
            view: Vec::new(),
            overlay: OverlayTable::new(config.overlay_cycle_budget),
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        !matches!(self.state, EngineState::Stopped)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.config.poll_interval
    }

    /// The ordered list currently shown to the user, most recent first.
    #[must_use]
    pub fn current_view(&self) -> &[PostViewModel] {
        &self.view
    }

    #[must_use]
    pub const fn overlay(&self) -> &OverlayTable {
        &self.overlay
    }

    /// Number of fetches started but not yet completed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Registers a callback fired every time a new merged view is published.
    pub fn on_update(&mut self, callback: impl FnMut(&[PostViewModel]) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Mounts the engine and starts the first fetch immediately.
    ///
    /// Returns `None` if the engine was already running.
    pub fn start(&mut self) -> Option<FetchTicket> {
        if self.is_running() {
            tracing::debug!("engine already running");
            return None;
        }

        tracing::info!(epoch = self.epoch, "feed engine started");
        self.state = EngineState::Idle;
        self.begin_poll()
    }

    /// Tears the engine down.
    ///
    /// Bumps the liveness epoch so that every fetch still in flight is
    /// discarded when it completes.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        tracing::info!(
            epoch = self.epoch,
            in_flight = self.in_flight.len(),
            "feed engine stopped"
        );
        self.state = EngineState::Stopped;
        self.epoch = self.epoch.wrapping_add(1);
        self.in_flight.clear();
    }

    /// Marks the poll timer as armed.
    ///
    /// Host timers cannot be cancelled, so a restart while an old timer is
    /// still pending must not schedule a second one. Returns `true` when the
    /// caller should actually schedule a timer.
    pub fn arm_timer(&mut self) -> bool {
        if !self.is_running() || self.timer_armed {
            return false;
        }
        self.timer_armed = true;
        true
    }

    /// Handles a fired poll timer.
    ///
    /// Returns the ticket for the new fetch, or `None` when stopped.
    pub fn on_timer(&mut self) -> Option<FetchTicket> {
        self.timer_armed = false;
        self.begin_poll()
    }

    /// Starts a fetch and returns its ticket, or `None` when stopped.
    pub fn begin_poll(&mut self) -> Option<FetchTicket> {
        if !self.is_running() {
            return None;
        }

        let ticket = FetchTicket {
            generation: self.next_generation,
            epoch: self.epoch,
        };
        self.next_generation += 1;

        if !self.in_flight.is_empty() {
            tracing::debug!(
                outstanding = self.in_flight.len(),
                "previous fetch still outstanding, newest response will win"
            );
        }
        self.in_flight.insert(ticket.generation);
        self.state = EngineState::Polling;

        tracing::debug!(generation = ticket.generation, "poll started");
        Some(ticket)
    }

    /// Completes a fetch with its decoded result.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Post>>) -> MergeOutcome {
        let _span = tracing::debug_span!(
            "complete_fetch",
            generation = ticket.generation,
            epoch = ticket.epoch
        )
        .entered();

        if ticket.epoch != self.epoch || !self.is_running() {
            tracing::debug!("fetch completed after stop, dropping result");
            return MergeOutcome::Orphaned;
        }

        self.in_flight.remove(&ticket.generation);

        let outcome = if ticket.generation <= self.latest_merged {
            tracing::debug!(latest_merged = self.latest_merged, "stale response dropped");
            MergeOutcome::Stale
        } else {
            match result {
                Err(e) => {
                    tracing::warn!(error = %e, "feed fetch failed, keeping current view");
                    MergeOutcome::Failed
                }
                Ok(posts) if posts.is_empty() => {
                    tracing::debug!("empty snapshot treated as unknown, keeping current view");
                    MergeOutcome::Retained
                }
                Ok(posts) => {
                    self.state = EngineState::Merging;
                    self.latest_merged = ticket.generation;
                    self.merge(posts);
                    MergeOutcome::Published
                }
            }
        };

        self.state = if self.in_flight.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Polling
        };

        outcome
    }

    /// Applies one optimistic like to `id` and re-publishes.
    pub fn apply_like(&mut self, id: PostId) -> LikeOverlay {
        let raw = self
            .snapshot
            .iter()
            .find(|p| p.id == id)
            .map_or(0, |p| p.stats.likes);

        let entry = self.overlay.add_like(id, raw);
        tracing::debug!(post_id = id, base = entry.base, delta = entry.delta, "optimistic like");
        self.republish();
        entry
    }

    /// Marks `brand_name` as followed and re-publishes.
    ///
    /// Returns how many posts in the current snapshot carry the brand.
    pub fn apply_follow(&mut self, brand_name: &str) -> usize {
        self.overlay.add_follow(brand_name);
        let affected = self
            .snapshot
            .iter()
            .filter(|p| p.brand_name == brand_name)
            .count();

        tracing::debug!(brand = %brand_name, affected = affected, "optimistic follow");
        self.republish();
        affected
    }

    /// Withdraws one optimistic like. Returns whether the view changed.
    pub fn rollback_like(&mut self, id: PostId) -> bool {
        let changed = self.overlay.retract_like(id);
        if changed {
            tracing::debug!(post_id = id, "optimistic like rolled back");
            self.republish();
        }
        changed
    }

    /// Withdraws an optimistic follow. Returns whether the view changed.
    pub fn rollback_follow(&mut self, brand_name: &str) -> bool {
        let changed = self.overlay.retract_follow(brand_name);
        if changed {
            tracing::debug!(brand = %brand_name, "optimistic follow rolled back");
            self.republish();
        }
        changed
    }

    /// Reverses arrival order, drops duplicate ids and reconciles the overlay.
    fn merge(&mut self, mut posts: Vec<Post>) {
        posts.reverse();

        let mut seen = HashSet::with_capacity(posts.len());
        let before = posts.len();
        posts.retain(|post| seen.insert(post.id));
        if posts.len() != before {
            tracing::warn!(dropped = before - posts.len(), "duplicate post ids in snapshot");
        }

        let reconciliation = self.overlay.reconcile(&posts);
        tracing::debug!(
            posts = posts.len(),
            confirmed = reconciliation.confirmed,
            expired = reconciliation.expired,
            pending = reconciliation.pending,
            "snapshot merged"
        );

        self.snapshot = posts;
        self.republish();
    }

    fn republish(&mut self) {
        let view: Vec<PostViewModel> = self
            .snapshot
            .iter()
            .map(|post| self.overlay.apply(post))
            .collect();
        self.view = view;

        for callback in &mut self.subscribers {
            callback(&self.view);
        }
    }
}

impl Default for FeedEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for FeedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedEngine")
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("latest_merged", &self.latest_merged)
            .field("in_flight", &self.in_flight)
            .field("posts", &self.view.len())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
