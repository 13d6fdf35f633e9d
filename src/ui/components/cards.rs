//! Post card renderer.
//!
//! Each card takes [`CARD_HEIGHT`](crate::app::state::CARD_HEIGHT) rows:
//!
//! ```text
//! ▌ [E] EnduraStride · 2024-05-01 12:30                 Following
//! ▌ Run further, recover faster
//! ▌ Our new trail shoe is out now…
//! ▌ ♥ 12*   ↗ 3   ✎ 2   "love the colors"
//! ```

use crate::ui::helpers::{self, display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Renders cards from `row` on and returns the next free row.
pub fn render_cards(row: usize, cards: &[CardItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(current_row, card, theme, cols);
    }
    current_row
}

fn gutter(card: &CardItem, theme: &Theme) {
    if card.is_selected {
        print!("{}▌ {}", Theme::fg(&theme.colors.selection_bg), Theme::reset());
    } else {
        print!("  ");
    }
}

fn render_card(row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    let post = &card.post;

    position_cursor(row, 1);
    gutter(card, theme);
    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }
    print!("{}[{}] {}", Theme::bold(), post.brand_initial, Theme::reset());
    print!("{}", Theme::fg(&theme.colors.brand_fg));
    print!("{}", Theme::bold());
    helpers::render_highlighted_text(&card.brand, &card.highlight_ranges, theme, card.is_selected);
    print!("{}", Theme::reset());
    print!("{}{}", Theme::fg(&theme.colors.text_dim), card.posted_at);

    let label = post.follow_label();
    let used = 2 + display_len(&post.brand_initial) + 3 + display_len(&card.brand) + display_len(&card.posted_at);
    let gap = cols.saturating_sub(used + display_len(label) + 1);
    print!("{}", " ".repeat(gap));
    let follow_color = if post.follow_pending {
        &theme.colors.pending_fg
    } else if post.is_following {
        &theme.colors.following_fg
    } else {
        &theme.colors.text_dim
    };
    print!("{}{label}{}", Theme::fg(follow_color), Theme::reset());

    position_cursor(row + 1, 1);
    gutter(card, theme);
    print!("{}{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), card.usp);
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    gutter(card, theme);
    print!("{}{}{}", Theme::fg(&theme.colors.text_normal), card.caption, Theme::reset());

    position_cursor(row + 3, 1);
    gutter(card, theme);
    let likes_color = if post.like_pending {
        &theme.colors.pending_fg
    } else {
        &theme.colors.like_fg
    };
    print!("{}{}{}", Theme::fg(likes_color), card.stats_line, Theme::reset());

    row + 5
}
