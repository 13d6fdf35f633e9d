//! Brand filter input box.

use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the box.
const FILTER_BOX_MARGIN: usize = 2;

/// Renders a three-line bordered box holding the filter query.
///
/// ```text
///   ┌──────────────────┐
///   │ Brand: endura▏   │
///   └──────────────────┘
/// ```
///
/// Returns the row after the box.
pub fn render_filter_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(FILTER_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let text = truncate(&format!(" Brand: {}▏", search.query), inner_width);
    let padding = inner_width.saturating_sub(display_len(&text));

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{}{text}{}", Theme::fg(&theme.colors.text_normal), " ".repeat(padding));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
