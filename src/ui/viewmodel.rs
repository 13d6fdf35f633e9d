//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready text only: captions are already
//! truncated to the pane width and fuzzy match ranges are precomputed.

use crate::engine::PostViewModel;
use crate::ui::helpers::{display_len, single_line, truncate};

/// Columns reserved on each side of a card for the selection gutter.
const CARD_GUTTER: usize = 2;

/// Columns on the brand line taken by the `[X] ` avatar brackets, the space
/// before the follow label and the trailing margin.
const BRAND_LINE_CHROME: usize = 5;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Cards visible in the current window, most recent first.
    pub cards: Vec<CardItem>,

    /// Index of the selected card within `cards`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Present when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while the brand filter is being edited.
    pub search_bar: Option<SearchBarInfo>,
}

/// Display information for one post card.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub post: PostViewModel,

    /// Brand name cut to fit beside the avatar and follow label.
    pub brand: String,

    /// ` · <time>` suffix, empty when there is no timestamp or no room.
    pub posted_at: String,

    /// Tagline cut to the card width.
    pub usp: String,

    /// Caption cut to the card width.
    pub caption: String,

    /// Likes, shares and reactions summary line.
    pub stats_line: String,

    pub is_selected: bool,

    /// Character ranges of `post.brand_name` matched by the filter.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl CardItem {
    /// Builds a card for a pane `cols` columns wide.
    #[must_use]
    pub fn new(
        post: PostViewModel,
        cols: usize,
        is_selected: bool,
        highlight_ranges: Vec<(usize, usize)>,
    ) -> Self {
        let width = cols.saturating_sub(CARD_GUTTER * 2);

        let like_marker = if post.like_pending { "*" } else { "" };
        let mut stats_line = format!(
            "♥ {}{like_marker}   ↗ {}   ✎ {}",
            post.likes, post.shares, post.reaction_count
        );
        if let Some(thought) = &post.latest_thought {
            stats_line.push_str(&format!("   \"{}\"", single_line(thought)));
        }

        let brand_width = cols.saturating_sub(
            CARD_GUTTER + display_len(&post.brand_initial) + display_len(post.follow_label()) + BRAND_LINE_CHROME,
        );
        let brand = truncate(&single_line(&post.brand_name), brand_width);
        let posted_at = if post.posted_at.is_empty() {
            String::new()
        } else {
            format!(" · {}", post.posted_at)
        };
        let posted_at = if display_len(&brand) + display_len(&posted_at) <= brand_width {
            posted_at
        } else {
            String::new()
        };

        Self {
            brand,
            posted_at,
            usp: truncate(&single_line(&post.usp), width),
            caption: truncate(&single_line(&post.caption), width),
            stats_line: truncate(&stats_line, width),
            post,
            is_selected,
            highlight_ranges,
        }
    }
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Feed status shown at the right edge (`live`, `stale`, `paused`, `connecting`).
    pub status: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Brand filter input display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}
