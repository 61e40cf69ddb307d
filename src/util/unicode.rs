use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `s` in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` down to `max_cells` terminal cells, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..)?;
    let first = rest.graphemes(true).next()?;
    Some(offset + first.len())
}

/// Byte offset of the grapheme before `offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset)?;
    head.grapheme_indices(true).next_back().map(|(i, _)| i)
}

/// Start of the word to the left of `offset` (whitespace-delimited).
pub fn word_start_before(s: &str, offset: usize) -> usize {
    let head = &s[..offset.min(s.len())];
    let trimmed = head.trim_end();
    match trimmed.rfind(char::is_whitespace) {
        Some(i) => i + trimmed[i..].chars().next().map_or(1, char::len_utf8),
        None => 0,
    }
}

/// Terminal column of byte `offset` within `s`.
pub fn display_col(s: &str, offset: usize) -> usize {
    display_width(&s[..offset.min(s.len())])
}

/// Drop leading graphemes until at least `cells` columns are gone. Returns the
/// rest of `s` and the number of columns actually dropped.
pub fn skip_width(s: &str, cells: usize) -> (&str, usize) {
    let mut skipped = 0;
    for (i, g) in s.grapheme_indices(true) {
        if skipped >= cells {
            return (&s[i..], skipped);
        }
        skipped += display_width(g);
    }
    ("", skipped)
}
