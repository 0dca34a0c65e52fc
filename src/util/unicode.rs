use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending
/// `…` when anything was cut. Cuts on grapheme boundaries so combining
/// marks and emoji never split.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for grapheme in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(grapheme);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme boundary after `offset`, or `None` at the
/// end of the string.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset >= s.len() {
        return None;
    }
    match s[offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(offset + i),
        None => Some(s.len()),
    }
}

/// Byte offset of the grapheme boundary before `offset`, or `None` at the
/// start of the string.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return None;
    }
    s[..offset].grapheme_indices(true).last().map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_wide_chars_as_two() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
        assert_eq!(truncate_to_width("abc", 3), "abc");
    }

    #[test]
    fn truncate_reserves_a_cell_for_the_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abcdef", 1), "…");
        assert_eq!(truncate_to_width("abcdef", 0), "");
    }

    #[test]
    fn truncate_does_not_split_wide_chars() {
        // "日" is 2 cells; budget 2 leaves room for the ellipsis only after
        // zero or one full characters.
        assert_eq!(truncate_to_width("日本語", 4), "日…");
    }

    #[test]
    fn grapheme_boundaries_walk_multibyte_text() {
        let s = "aé日";
        let first = next_grapheme_boundary(s, 0).unwrap();
        let second = next_grapheme_boundary(s, first).unwrap();
        assert_eq!(&s[..first], "a");
        assert_eq!(&s[first..second], "é");
        assert_eq!(next_grapheme_boundary(s, s.len()), None);

        assert_eq!(prev_grapheme_boundary(s, s.len()), Some(second));
        assert_eq!(prev_grapheme_boundary(s, first), Some(0));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }
}
