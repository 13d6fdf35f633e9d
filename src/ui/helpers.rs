//! Shared rendering utilities.
//!
//! Text measurement here is by `char`, not by byte, so brand names and
//! captions with non-ASCII characters lay out and highlight correctly.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Collapses newlines and runs of whitespace into single spaces.
///
/// Card fields come from generated copy that may span several lines; each
/// must fit on one terminal row.
///
/// ```rust
/// use campaign_feed::ui::helpers::single_line;
///
/// assert_eq!(single_line("Run further.\n\n  Recover faster. "), "Run further. Recover faster.");
/// ```
#[must_use]
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to at most `width` characters, ending with `…` when cut.
///
/// # Example
///
/// ```rust
/// use campaign_feed::ui::helpers::truncate;
///
/// assert_eq!(truncate("EnduraStride", 6), "Endur…");
/// assert_eq!(truncate("Endura", 6), "Endura");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Prints text with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting
/// is skipped on the selected card so it does not fight the selection colors.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.brand_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Café Noir", 5), "Café…");
        assert_eq!(display_len("Café"), 4);
    }

    #[test]
    fn single_line_flattens_tabs_and_crlf() {
        assert_eq!(single_line("a\r\n\tb"), "a b");
        assert_eq!(single_line("   "), "");
    }

    #[test]
    fn truncate_to_zero_is_empty() {
        assert_eq!(truncate("abc", 0), "");
    }
}
