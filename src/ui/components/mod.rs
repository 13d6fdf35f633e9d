//! Composable UI component renderers.
//!
//! - [`header`]: Title and feed status
//! - [`filter`]: Brand filter input box
//! - [`cards`]: Post cards
//! - [`footer`]: Keybinding hints
//! - [`empty`]: Message shown when there is nothing to list
//!
//! [`render_feed`] lays them out top to bottom:
//!
//! ```text
//! [Header]
//! [Border]
//! [Filter box, 3 lines, only while filtering]
//! [Cards or empty state]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod empty;
mod filter;
mod footer;
mod header;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_cards;
use empty::render_empty_state;
use filter::render_filter_bar;
use footer::render_footer;
use header::render_header;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full feed layout.
pub fn render_feed(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_filter_bar(current_row, search, theme, cols);
    }

    match &vm.empty_state {
        Some(empty) => render_empty_state(current_row + 2, empty, theme, cols),
        None => {
            render_cards(current_row, &vm.cards, theme, cols);
        }
    }

    let footer_row = rows;
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
