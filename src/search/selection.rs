//! Mapping a selection in the rendered title list back to a result row.
//!
//! Offsets are character indices into the rendered text, not byte
//! indices, so titles with non-ASCII characters resolve the same way a
//! text widget reports its caret.

/// A selection expanded to cover whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    /// Character offset of the first character of the first line.
    pub start: usize,
    /// Character offset just past the last character of the last line.
    pub end: usize,
    /// Zero-based row of the line containing `start`.
    pub row: usize,
}

/// A line selection together with the tag it resolves to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub selection: LineSelection,
    pub tag: Option<&'a str>,
}

/// Expand `start..end` outward to line boundaries.
///
/// Offsets past the end of the text are clamped, and a reversed range is
/// treated as if its ends were swapped.
#[must_use]
pub fn expand_to_line(text: &str, start: usize, end: usize) -> LineSelection {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let (start, end) = {
        let (a, b) = (start.min(len), end.min(len));
        if a <= b { (a, b) } else { (b, a) }
    };

    let line_start = chars[..start]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1);
    let line_end = chars[end..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(len, |i| end + i);
    let row = chars[..line_start].iter().filter(|&&c| c == '\n').count();

    LineSelection {
        start: line_start,
        end: line_end,
        row,
    }
}

/// Expand a selection and look up the tag of its row.
///
/// A row outside `row_to_tag`, including any row of an empty result list,
/// resolves to no tag.
#[must_use]
pub fn resolve_selection<'a>(
    text: &str,
    start: usize,
    end: usize,
    row_to_tag: &'a [String],
) -> Resolved<'a> {
    let selection = expand_to_line(text, start, end);
    let tag = row_to_tag.get(selection.row).map(String::as_str);

    Resolved { selection, tag }
}
