//! Application state and view model computation.
//!
//! [`AppState`] pairs the [`FeedEngine`] (the source of truth for posts) with
//! the purely presentational state layered on top of it: the cursor, the
//! brand filter and the theme. The filter and cursor never feed back into the
//! engine; they only shape what is drawn from `current_view()`.
//!
//! The engine notifies the state through its `on_update` subscription. The
//! state keeps a copy of the last published list and re-derives the filtered
//! list only when a new publish has happened.
//!
//! # Example
//!
//! ```rust
//! use campaign_feed::app::AppState;
//! use campaign_feed::dispatcher::DeliveryPolicy;
//! use campaign_feed::engine::FeedEngine;
//! use campaign_feed::ui::Theme;
//!
//! let state = AppState::new(FeedEngine::default(), DeliveryPolicy::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::modes::InputMode;
use crate::dispatcher::DeliveryPolicy;
use crate::domain::PostId;
use crate::engine::{FeedEngine, MergeOutcome, PostViewModel};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cell::RefCell;
use std::rc::Rc;

/// Rows taken by one post card, including the blank spacer line.
pub const CARD_HEIGHT: usize = 5;

/// Central application state container.
pub struct AppState {
    /// Feed engine; all post data flows out of here.
    pub engine: FeedEngine,

    /// What to do with optimistic changes when a request fails.
    pub policy: DeliveryPolicy,

    /// Last list published by the engine, most recent first.
    published: Rc<RefCell<Option<Vec<PostViewModel>>>>,

    /// Posts currently shown after the brand filter.
    pub visible_posts: Vec<PostViewModel>,

    /// Id of the post under the cursor.
    ///
    /// Tracked by id so the cursor stays on the same post when a poll
    /// inserts newer posts above it.
    pub selected_id: Option<PostId>,

    pub input_mode: InputMode,

    /// Brand filter query. Empty means no filtering.
    pub filter_query: String,

    pub theme: Theme,

    /// Outcome of the most recent completed fetch, for the status line.
    pub last_outcome: Option<MergeOutcome>,
}

impl AppState {
    /// Creates application state around an engine and subscribes to its publishes.
    #[must_use]
    pub fn new(mut engine: FeedEngine, policy: DeliveryPolicy, theme: Theme) -> Self {
        let published: Rc<RefCell<Option<Vec<PostViewModel>>>> = Rc::default();
        let sink = Rc::clone(&published);
        engine.on_update(move |view| {
            *sink.borrow_mut() = Some(view.to_vec());
        });

        Self {
            engine,
            policy,
            published,
            visible_posts: Vec::new(),
            selected_id: None,
            input_mode: InputMode::Normal,
            filter_query: String::new(),
            theme,
            last_outcome: None,
        }
    }

    /// Picks up a pending engine publish, if any.
    ///
    /// Returns `true` when a new list was taken over and the filter re-applied.
    pub fn sync_from_engine(&mut self) -> bool {
        let Some(view) = self.published.borrow_mut().take() else {
            return false;
        };

        self.apply_filter_to(&view);
        true
    }

    /// Re-applies the brand filter to the engine's current view.
    pub fn apply_filter(&mut self) {
        let view = self.engine.current_view().to_vec();
        self.apply_filter_to(&view);
    }

    fn apply_filter_to(&mut self, view: &[PostViewModel]) {
        let _span = tracing::debug_span!(
            "apply_filter",
            total_posts = view.len(),
            query_len = self.filter_query.len()
        )
        .entered();

        let query = self.normalized_query();
        self.visible_posts = if query.is_empty() {
            view.to_vec()
        } else {
            let matcher = SkimMatcherV2::default();
            view.iter()
                .filter(|post| {
                    matcher
                        .fuzzy_match(&post.brand_name.to_lowercase(), &query)
                        .is_some()
                })
                .cloned()
                .collect()
        };

        let still_visible = self
            .selected_id
            .is_some_and(|id| self.visible_posts.iter().any(|p| p.id == id));
        if !still_visible {
            self.selected_id = self.visible_posts.first().map(|p| p.id);
        }

        tracing::debug!(visible = self.visible_posts.len(), "brand filter applied");
    }

    /// Index of the selected post within `visible_posts`.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_id
            .and_then(|id| self.visible_posts.iter().position(|p| p.id == id))
            .unwrap_or(0)
    }

    #[must_use]
    pub fn selected_post(&self) -> Option<&PostViewModel> {
        self.visible_posts.get(self.selected_index())
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.visible_posts.is_empty() {
            return;
        }
        let next = (self.selected_index() + 1) % self.visible_posts.len();
        self.selected_id = Some(self.visible_posts[next].id);
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.visible_posts.is_empty() {
            return;
        }
        let current = self.selected_index();
        let next = if current == 0 {
            self.visible_posts.len() - 1
        } else {
            current - 1
        };
        self.selected_id = Some(self.visible_posts[next].id);
    }

    /// Computes the renderable view model for the given terminal size.
    ///
    /// Cards are windowed around the cursor so the selected post stays on
    /// screen.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();
        let search_bar = self.compute_search_bar();

        if self.visible_posts.is_empty() {
            return UIViewModel {
                cards: vec![],
                selected_index: 0,
                header,
                footer,
                empty_state: Some(self.compute_empty_state()),
                search_bar,
            };
        }

        let capacity = (self.calculate_available_rows(rows) / CARD_HEIGHT).max(1);
        let selected = self.selected_index();

        let mut start = selected.saturating_sub(capacity / 2);
        let end = (start + capacity).min(self.visible_posts.len());
        if end - start < capacity {
            start = end.saturating_sub(capacity);
        }

        let matcher = (self.input_mode.is_filtering() && !self.normalized_query().is_empty())
            .then(SkimMatcherV2::default);

        let cards = self.visible_posts[start..end]
            .iter()
            .enumerate()
            .map(|(offset, post)| {
                let is_selected = start + offset == selected;
                let highlight_ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&post.brand_name, m));
                CardItem::new(post.clone(), cols, is_selected, highlight_ranges)
            })
            .collect();

        UIViewModel {
            cards,
            selected_index: selected - start,
            header,
            footer,
            empty_state: None,
            search_bar,
        }
    }

    /// The filter text as matched: trimmed and lowercased.
    fn normalized_query(&self) -> String {
        self.filter_query.trim().to_lowercase()
    }

    /// Coalesces fuzzy match positions into `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(&text.to_lowercase(), &self.normalized_query())
        else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end += 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = if !self.engine.is_running() {
            "paused"
        } else {
            match self.last_outcome {
                Some(MergeOutcome::Failed | MergeOutcome::Retained) => "stale",
                None => "connecting",
                _ => "live",
            }
        };

        HeaderInfo {
            title: format!(" MarketMind ({}) ", self.visible_posts.len()),
            status: status.to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Filter => "ESC: clear filter  Enter: done  Ctrl+n/p: navigate  Type to filter brands",
            InputMode::Normal => {
                "j/k: navigate  l: like  s: share  f: follow  /: filter  p: pause  q: hide"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.input_mode.is_filtering().then(|| SearchBarInfo {
            query: self.filter_query.clone(),
        })
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.engine.current_view().is_empty() {
            let seconds = self.engine.poll_interval().as_secs_f64();
            EmptyState {
                message: "No campaigns yet".to_string(),
                subtitle: format!("Checking for new posts every {seconds}s"),
            }
        } else {
            EmptyState {
                message: "No brands match the filter".to_string(),
                subtitle: "Press ESC to clear it".to_string(),
            }
        }
    }

    /// Rows left for cards after header, borders, footer and the filter box.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(5),
            InputMode::Filter => total_rows.saturating_sub(8),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("visible_posts", &self.visible_posts.len())
            .field("selected_id", &self.selected_id)
            .field("input_mode", &self.input_mode)
            .field("filter_query", &self.filter_query)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;

    fn state_with(posts: Vec<Post>) -> AppState {
        let mut state = AppState::new(FeedEngine::default(), DeliveryPolicy::default(), Theme::default());
        let ticket = state.engine.start().unwrap();
        state.engine.complete_fetch(ticket, Ok(posts));
        state.sync_from_engine();
        state
    }

    #[test]
    fn publish_is_picked_up_once() {
        let mut state = state_with(vec![Post::new(1, "EnduraStride")]);

        assert_eq!(state.visible_posts.len(), 1);
        assert!(!state.sync_from_engine());
    }

    #[test]
    fn cursor_follows_the_post_across_polls() {
        let mut state = state_with(vec![Post::new(1, "A"), Post::new(2, "B")]);
        state.move_selection_down();
        assert_eq!(state.selected_post().map(|p| p.id), Some(1));

        let ticket = state.engine.begin_poll().unwrap();
        state
            .engine
            .complete_fetch(ticket, Ok(vec![Post::new(1, "A"), Post::new(2, "B"), Post::new(3, "C")]));
        state.sync_from_engine();

        assert_eq!(state.selected_post().map(|p| p.id), Some(1));
        assert_eq!(state.selected_index(), 2);
    }

    #[test]
    fn selection_wraps() {
        let mut state = state_with(vec![Post::new(1, "A"), Post::new(2, "B")]);

        state.move_selection_up();
        assert_eq!(state.selected_index(), 1);
        state.move_selection_down();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn brand_filter_is_fuzzy_and_presentational() {
        let mut state = state_with(vec![
            Post::new(1, "EnduraStride"),
            Post::new(2, "SprintStyle"),
        ]);

        state.filter_query = "sprt".to_string();
        state.apply_filter();

        assert_eq!(state.visible_posts.len(), 1);
        assert_eq!(state.visible_posts[0].brand_name, "SprintStyle");
        assert_eq!(state.engine.current_view().len(), 2);
    }

    #[test]
    fn trailing_space_in_query_still_highlights() {
        let mut state = state_with(vec![
            Post::new(1, "EnduraStride"),
            Post::new(2, "SprintStyle"),
        ]);
        state.input_mode = InputMode::Filter;
        state.filter_query = "sprint ".to_string();
        state.apply_filter();

        let vm = state.compute_viewmodel(40, 80);

        assert_eq!(vm.cards.len(), 1);
        assert_eq!(vm.cards[0].highlight_ranges, vec![(0, 6)]);
    }

    #[test]
    fn viewmodel_windows_around_selection() {
        let posts = (1..=10).map(|id| Post::new(id, "A")).collect();
        let mut state = state_with(posts);
        for _ in 0..8 {
            state.move_selection_down();
        }

        let vm = state.compute_viewmodel(5 + CARD_HEIGHT * 3, 80);

        assert_eq!(vm.cards.len(), 3);
        assert!(vm.cards[vm.selected_index].is_selected);
        assert_eq!(vm.cards[vm.selected_index].post.id, 2);
    }

    #[test]
    fn empty_feed_shows_waiting_message() {
        let state = AppState::new(FeedEngine::default(), DeliveryPolicy::default(), Theme::default());

        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.empty_state.map(|e| e.message).as_deref(), Some("No campaigns yet"));
        assert_eq!(vm.header.status, "paused");
    }
}
