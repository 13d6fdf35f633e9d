//! Header component renderer.

use crate::ui::helpers::{display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title on the left and the feed status on the right.
///
/// Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let status = format!("● {} ", header.status);
    let title_len = display_len(&header.title);
    let status_len = display_len(&status);
    let gap = cols.saturating_sub(title_len + status_len);

    let status_color = match header.status.as_str() {
        "live" => &theme.colors.status_live_fg,
        "stale" => &theme.colors.status_stale_fg,
        _ => &theme.colors.text_dim,
    };

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", header.title);
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(status_color));
    print!("{status}");
    print!("{}", Theme::reset());
    row + 1
}
